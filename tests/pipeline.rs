use std::fs;
use std::path::Path;

use mcm_chart::{ChartConfig, ChartGenerator, ErrorKind};

fn generator_in(dir: &Path, csv: Option<&str>) -> ChartGenerator {
    let input = dir.join("times.csv");
    if let Some(text) = csv {
        fs::write(&input, text).unwrap();
    }
    ChartGenerator::new(ChartConfig {
        input,
        output: dir.join("plot.png"),
        dpi: 72,
        ..ChartConfig::default()
    })
}

fn run(generator: &ChartGenerator) -> (Result<(), mcm_chart::ChartError>, Vec<String>) {
    let mut out = Vec::new();
    let result = generator.run(&mut out);
    let lines = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    (result, lines)
}

#[test]
fn writes_png_and_reports_trimmed_columns() {
    let dir = tempfile::tempdir().unwrap();
    let generator = generator_in(dir.path(), Some("Size, DP , DC\n1,10,12\n2,20,18\n"));

    let (result, lines) = run(&generator);
    result.unwrap();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], r#"Columns: ["Size", "DP", "DC"]"#);
    assert!(lines[1].ends_with("plot.png"), "{}", lines[1]);

    let image = image::open(dir.path().join("plot.png")).unwrap();
    let (full_w, full_h) = generator.config.figure().pixels();
    assert!(image.width() > 0 && image.width() <= full_w);
    assert!(image.height() > 0 && image.height() <= full_h);
}

#[test]
fn key_only_table_still_saves() {
    let dir = tempfile::tempdir().unwrap();
    let generator = generator_in(dir.path(), Some("Size\n5\n10\n"));

    let (result, lines) = run(&generator);
    result.unwrap();

    assert_eq!(lines[0], r#"Columns: ["Size"]"#);
    assert!(dir.path().join("plot.png").exists());
}

#[test]
fn missing_input_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let generator = generator_in(dir.path(), None);

    let (result, lines) = run(&generator);
    assert_eq!(result.unwrap_err().kind(), ErrorKind::FileNotFound);
    assert!(lines.is_empty());
    assert!(!dir.path().join("plot.png").exists());
}

#[test]
fn missing_size_column_aborts_before_saving() {
    let dir = tempfile::tempdir().unwrap();
    let generator = generator_in(dir.path(), Some("N,DP\n1,2\n"));

    let (result, lines) = run(&generator);
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Parse);
    assert_eq!(lines, vec![r#"Columns: ["N", "DP"]"#.to_string()]);
    assert!(!dir.path().join("plot.png").exists());
}

#[test]
fn unwritable_destination_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut generator = generator_in(dir.path(), Some("Size,DP\n1,0\n"));
    generator.config.output = dir.path().join("no-such-dir").join("plot.png");

    let (result, _) = run(&generator);
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Io);
}

#[test]
fn infinite_cells_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let generator = generator_in(dir.path(), Some("Size,DP\n1,inf\n2,3\ninfinity,4\n"));

    let (result, lines) = run(&generator);
    result.unwrap();

    assert_eq!(lines.len(), 2);
    assert!(dir.path().join("plot.png").exists());
}
