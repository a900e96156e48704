use log::debug;
use plotters::style::RGBColor;

use crate::color::generate_palette;
use crate::data::model::{Dataset, KEY_COLUMN};
use crate::error::{ChartError, Result};

pub const X_LABEL: &str = "Number of Matrices";
pub const Y_LABEL: &str = "Execution Time (ms)";
pub const TITLE: &str = "Matrix Chain Multiplication: D&C vs DP";

// ---------------------------------------------------------------------------
// Series – one plotted line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
}

/// One non-key column drawn against the key column.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub color: RGBColor,
    pub marker: Marker,
    pub line: LineStyle,
    /// Row-ordered points, split wherever a row has a missing value.
    pub runs: Vec<Vec<(f64, f64)>>,
}

impl Series {
    /// All points of every run, in row order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.runs.iter().flatten().copied()
    }
}

// ---------------------------------------------------------------------------
// Styling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    /// Dash and gap length in points.
    pub dash: (f64, f64),
    pub opacity: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        GridStyle {
            dash: (3.7, 1.6),
            opacity: 0.7,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartStyle {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub legend: bool,
    pub grid: Option<GridStyle>,
    /// Explicit x tick positions; `None` leaves tick placement automatic.
    pub x_ticks: Option<Vec<f64>>,
}

// ---------------------------------------------------------------------------
// Chart – series plus static metadata, ready for `render::save`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub series: Vec<Series>,
    /// Values of the key column in row order, missing cells dropped.
    pub key_values: Vec<f64>,
    pub style: ChartStyle,
}

impl Chart {
    pub fn legend_labels(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.label.as_str()).collect()
    }

    /// Data bounds over the key column and every series value.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let x = min_max(self.key_values.iter().copied())?;
        let y = min_max(self.series.iter().flat_map(|s| s.points().map(|(_, y)| y)));
        Some((x, y.unwrap_or((0.0, 1.0))))
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Add one line series per non-key column, each plotted against `Size`.
///
/// Rows stay in their source order; nothing is sorted or deduplicated. A row
/// missing either coordinate, or holding a non-finite one, ends the current
/// run, which leaves a gap in the drawn line.
pub fn render_series(dataset: &Dataset) -> Result<Chart> {
    let key = dataset
        .key_column()
        .ok_or_else(|| ChartError::MissingKeyColumn {
            name: KEY_COLUMN.to_string(),
            found: dataset.column_names().iter().map(|s| s.to_string()).collect(),
        })?;

    let columns: Vec<_> = dataset.series_columns().collect();
    let palette = generate_palette(columns.len());

    let series: Vec<Series> = columns
        .iter()
        .zip(palette)
        .map(|(col, color)| {
            let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
            let mut current = Vec::new();
            for (x, y) in key.values.iter().zip(&col.values) {
                match (finite(*x), finite(*y)) {
                    (Some(x), Some(y)) => current.push((x, y)),
                    _ => {
                        if !current.is_empty() {
                            runs.push(std::mem::take(&mut current));
                        }
                    }
                }
            }
            if !current.is_empty() {
                runs.push(current);
            }
            debug!("series '{}': {} run(s)", col.name, runs.len());
            Series {
                label: col.name.clone(),
                color,
                marker: Marker::Circle,
                line: LineStyle::Solid,
                runs,
            }
        })
        .collect();

    Ok(Chart {
        series,
        key_values: key.values.iter().filter_map(|v| finite(*v)).collect(),
        style: ChartStyle::default(),
    })
}

/// Non-finite cells (`inf`, `NaN`) count as missing.
fn finite(cell: Option<f64>) -> Option<f64> {
    cell.filter(|v| v.is_finite())
}

/// Attach the fixed labels, legend, dashed grid and `Size` tick marks.
pub fn apply_styling(mut chart: Chart) -> Chart {
    chart.style = ChartStyle {
        title: Some(TITLE.to_string()),
        x_label: Some(X_LABEL.to_string()),
        y_label: Some(Y_LABEL.to_string()),
        legend: true,
        grid: Some(GridStyle::default()),
        x_ticks: Some(distinct_sorted(&chart.key_values)),
    };
    chart
}

/// Distinct values in ascending order.
pub fn distinct_sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}
