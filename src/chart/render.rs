use std::fs::File;
use std::io::{BufWriter, Write};
use std::ops::Range;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use log::{debug, info};
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::model::{Chart, GridStyle};
use crate::error::{ChartError, Result};

/// Tick count hint for axes without explicit ticks.
const AUTO_TICKS: usize = 10;
const FONT: &str = "sans-serif";
const GRID_COLOR: RGBColor = RGBColor(176, 176, 176);

// ---------------------------------------------------------------------------
// Figure geometry
// ---------------------------------------------------------------------------

/// Physical figure size. Every length below is given in points (1/72 inch)
/// and scaled by the resolution, so the image looks the same at any dpi.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl Figure {
    pub fn new(width_in: f64, height_in: f64, dpi: u32) -> Self {
        Figure {
            width_in,
            height_in,
            dpi,
        }
    }

    pub fn pixels(&self) -> (u32, u32) {
        (
            (self.width_in * f64::from(self.dpi)).round() as u32,
            (self.height_in * f64::from(self.dpi)).round() as u32,
        )
    }

    /// Points → pixels.
    pub fn pt(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.0
    }

    fn px(&self, points: f64) -> u32 {
        self.pt(points).round().max(1.0) as u32
    }
}

impl Default for Figure {
    fn default() -> Self {
        Figure::new(6.4, 4.8, 100)
    }
}

// ---------------------------------------------------------------------------
// Key-value x axis
// ---------------------------------------------------------------------------

/// A linear f64 axis whose tick marks sit exactly on `ticks`.
pub struct KeyTicks {
    inner: RangedCoordf64,
    ticks: Vec<f64>,
}

impl KeyTicks {
    pub fn new(range: Range<f64>, ticks: Vec<f64>) -> Self {
        KeyTicks {
            inner: range.into(),
            ticks,
        }
    }
}

impl Ranged for KeyTicks {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.weight().allow_light_points() {
            Vec::new()
        } else {
            self.ticks.clone()
        }
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Rasterize `chart` at `dpi` on the default figure size, crop it to its
/// content and write it as PNG.
pub fn save(chart: &Chart, path: &Path, dpi: u32) -> Result<()> {
    let figure = Figure {
        dpi,
        ..Figure::default()
    };
    save_figure(chart, path, figure)
}

/// Same as [`save`] with an explicit figure size.
pub fn save_figure(chart: &Chart, path: &Path, figure: Figure) -> Result<()> {
    let image = render(chart, figure)?;
    let pad = figure.pt(7.2).round() as u32;
    let image = crop_to_content(&image, Rgb([255, 255, 255]), pad);
    debug!(
        "cropped {:?} → {}x{}",
        figure.pixels(),
        image.width(),
        image.height()
    );
    write_png(&image, path)?;
    info!("wrote {} ({} dpi)", path.display(), figure.dpi);
    Ok(())
}

/// Draw the chart into an in-memory RGB image.
pub fn render(chart: &Chart, figure: Figure) -> Result<RgbImage> {
    let (w, h) = figure.pixels();
    let mut buf = vec![0u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        root.fill(&WHITE)?;
        draw(&root, chart, &figure)?;
        root.present()?;
    }
    RgbImage::from_raw(w, h, buf)
        .ok_or_else(|| ChartError::Render(format!("pixel buffer does not match {w}x{h}")))
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn draw(root: &DrawingArea<BitMapBackend<'_>, Shift>, chart: &Chart, fig: &Figure) -> Result<()> {
    let ((x_lo, x_hi), (y_lo, y_hi)) = chart.bounds().unwrap_or(((0.0, 1.0), (0.0, 1.0)));
    let x_range = padded(x_lo, x_hi);
    let y_range = padded(y_lo, y_hi);

    let x_ticks = match &chart.style.x_ticks {
        Some(ticks) => ticks.clone(),
        None => RangedCoordf64::from(x_range.clone()).key_points(AUTO_TICKS),
    };

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(fig.pt(10.0))
        .x_label_area_size(fig.pt(32.0))
        .y_label_area_size(fig.pt(44.0));
    if let Some(title) = &chart.style.title {
        builder.caption(title, (FONT, fig.pt(12.0)));
    }
    let mut ctx = builder.build_cartesian_2d(
        KeyTicks::new(x_range.clone(), x_ticks.clone()),
        y_range.clone(),
    )?;

    let x_formatter = |v: &f64| format_tick(*v);
    let mut mesh = ctx.configure_mesh();
    mesh.disable_mesh()
        .x_label_formatter(&x_formatter)
        .y_labels(AUTO_TICKS)
        .label_style((FONT, fig.pt(10.0)))
        .axis_desc_style((FONT, fig.pt(10.0)))
        .axis_style(BLACK.stroke_width(fig.px(0.8)))
        .set_all_tick_mark_size(fig.pt(3.5));
    if let Some(label) = &chart.style.x_label {
        mesh.x_desc(label.as_str());
    }
    if let Some(label) = &chart.style.y_label {
        mesh.y_desc(label.as_str());
    }
    mesh.draw()?;

    if let Some(grid) = chart.style.grid {
        let y_ticks = ctx.as_coord_spec().y_spec().key_points(AUTO_TICKS);
        let lines = x_ticks
            .iter()
            .map(|&x| vec![(x, y_range.start), (x, y_range.end)])
            .chain(
                y_ticks
                    .iter()
                    .map(|&y| vec![(x_range.start, y), (x_range.end, y)]),
            );
        draw_grid(&mut ctx, lines, grid, fig)?;
    }

    let line_width = fig.px(1.5);
    let marker_radius = fig.px(3.0);
    let swatch = fig.pt(20.0) as i32;
    for series in &chart.series {
        let style = series.color.filled().stroke_width(line_width);
        for run in &series.runs {
            ctx.draw_series(LineSeries::new(run.iter().copied(), style).point_size(marker_radius))?;
        }
        // One empty series carries the legend entry so split runs appear once.
        ctx.draw_series(std::iter::empty::<Circle<(f64, f64), u32>>())?
            .label(series.label.as_str())
            .legend(move |(x, y)| {
                EmptyElement::at((x, y))
                    + PathElement::new(vec![(0, 0), (swatch, 0)], style)
                    + Circle::new((swatch / 2, 0), marker_radius, style)
            });
    }

    if chart.style.legend && !chart.series.is_empty() {
        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .margin(fig.pt(4.0))
            .legend_area_size(fig.pt(24.0))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .label_font((FONT, fig.pt(10.0)))
            .draw()?;
    } else if chart.style.legend {
        debug!("no series to list in the legend");
    }

    Ok(())
}

fn draw_grid<I>(
    ctx: &mut ChartContext<'_, BitMapBackend<'_>, Cartesian2d<KeyTicks, RangedCoordf64>>,
    lines: I,
    grid: GridStyle,
    fig: &Figure,
) -> Result<()>
where
    I: Iterator<Item = Vec<(f64, f64)>>,
{
    let style = GRID_COLOR.mix(grid.opacity).stroke_width(fig.px(0.8));
    let (dash, gap) = (fig.px(grid.dash.0), fig.px(grid.dash.1));
    for line in lines {
        ctx.draw_series(DashedLineSeries::new(line, dash, gap, style))?;
    }
    Ok(())
}

/// Widen `lo..hi` by 5% on each side; a degenerate range gets ±1.
fn padded(lo: f64, hi: f64) -> Range<f64> {
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        return (lo - 1.0)..(hi + 1.0);
    }
    (lo - span * 0.05)..(hi + span * 0.05)
}

/// Whole numbers print without a fractional part.
fn format_tick(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

// ---------------------------------------------------------------------------
// Tight bounding box
// ---------------------------------------------------------------------------

/// Smallest rectangle `(x0, y0, x1, y1)` (exclusive ends) holding every pixel
/// that differs from `background`.
pub fn content_bounds(image: &RgbImage, background: Rgb<u8>) -> Option<(u32, u32, u32, u32)> {
    image
        .enumerate_pixels()
        .filter(|(_, _, p)| **p != background)
        .fold(None, |acc, (x, y, _)| match acc {
            None => Some((x, y, x + 1, y + 1)),
            Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1))),
        })
}

/// Crop to the content plus `pad` pixels on each side, clamped to the image.
/// A blank image is returned unchanged.
pub fn crop_to_content(image: &RgbImage, background: Rgb<u8>, pad: u32) -> RgbImage {
    let Some((x0, y0, x1, y1)) = content_bounds(image, background) else {
        return image.clone();
    };
    let x0 = x0.saturating_sub(pad);
    let y0 = y0.saturating_sub(pad);
    let x1 = (x1 + pad).min(image.width());
    let y1 = (y1 + pad).min(image.height());
    image::imageops::crop_imm(image, x0, y0, x1 - x0, y1 - y0).to_image()
}

fn write_png(image: &RgbImage, path: &Path) -> Result<()> {
    let io_err = |source| ChartError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    image
        .write_to(&mut writer, ImageFormat::Png)
        .map_err(|source| ChartError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush().map_err(io_err)
}
