use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use log::debug;

use super::model::{Column, Dataset};
use crate::error::{ChartError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a timing table from a CSV file.
///
/// CSV layout: one header row, then one row per input size. Every cell must
/// be numeric; surrounding spaces are ignored and an empty cell is read as a
/// missing value. Header names are kept verbatim, use
/// [`Dataset::normalize_headers`] to trim them.
pub fn load(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ChartError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ChartError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let dataset = read_csv(BufReader::new(file), path)?;
    debug!("loaded {}: {dataset}", path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Parse CSV text from any reader. `path` is only used in error messages.
pub fn read_csv<R: io::Read>(source: R, path: &Path) -> Result<Dataset> {
    let csv_err = |source: csv::Error| ChartError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(ChartError::EmptyTable {
            path: path.to_path_buf(),
        });
    }

    let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); headers.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(csv_err)?;
        for (col_idx, cell) in record.iter().enumerate() {
            let value = parse_cell(cell).ok_or_else(|| ChartError::InvalidNumber {
                column: headers[col_idx].trim().to_string(),
                row: row_no,
                value: cell.to_string(),
            })?;
            columns[col_idx].push(value);
        }
    }

    Ok(Dataset::from_columns(
        headers
            .into_iter()
            .zip(columns)
            .map(|(name, values)| Column::new(name, values))
            .collect(),
    ))
}

/// `Some(None)` for an empty cell, `None` when the text is not a number.
fn parse_cell(cell: &str) -> Option<Option<f64>> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Some(None);
    }
    cell.parse::<f64>().ok().map(Some)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::ErrorKind;

    fn read(text: &str) -> Result<Dataset> {
        read_csv(text.as_bytes(), Path::new("times.csv"))
    }

    #[test]
    fn reads_columns_in_source_order() {
        let ds = read("Size, DP , DC\n1,10,12\n2,20,18\n").unwrap();
        assert_eq!(ds.column_names(), vec!["Size", " DP ", " DC"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(
            ds.columns()[2].values,
            vec![Some(12.0), Some(18.0)]
        );
    }

    #[test]
    fn values_tolerate_spaces_and_blanks() {
        let ds = read("Size,DP\n 5 , 0.25\n6,\n").unwrap();
        assert_eq!(ds.columns()[0].values, vec![Some(5.0), Some(6.0)]);
        assert_eq!(ds.columns()[1].values, vec![Some(0.25), None]);
    }

    #[test]
    fn header_only_table_has_no_rows() {
        let ds = read("Size\n").unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.column_names(), vec!["Size"]);
    }

    #[test]
    fn non_numeric_cell_is_parse_error() {
        let err = read("Size,DP\n1,10\n2,fast\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        match err {
            ChartError::InvalidNumber { column, row, value } => {
                assert_eq!(column, "DP");
                assert_eq!(row, 1);
                assert_eq!(value, "fast");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ragged_row_is_parse_error() {
        let err = read("Size,DP,DC\n1,10\n").unwrap_err();
        assert!(matches!(err, ChartError::Csv { .. }));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn empty_input_is_parse_error() {
        let err = read("").unwrap_err();
        assert!(matches!(err, ChartError::EmptyTable { .. }));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("times.csv")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Size,DC,DP").unwrap();
        writeln!(file, "3,1,0").unwrap();
        let ds = load(file.path()).unwrap();
        assert_eq!(ds.column_names(), vec!["Size", "DC", "DP"]);
        assert_eq!(ds.columns()[1].values, vec![Some(1.0)]);
    }
}
