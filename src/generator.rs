use std::io::Write;

use log::info;

use crate::chart::model::{apply_styling, render_series};
use crate::chart::render::save_figure;
use crate::config::ChartConfig;
use crate::data::loader::load;
use crate::error::{ChartError, Result};

// ---------------------------------------------------------------------------
// ChartGenerator – load → normalize → render → style → save
// ---------------------------------------------------------------------------

/// Runs the whole pipeline for one configuration.
#[derive(Debug, Clone, Default)]
pub struct ChartGenerator {
    pub config: ChartConfig,
}

impl ChartGenerator {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// Produce the chart and report progress on `out`.
    ///
    /// Writes the trimmed column names once the table is loaded and a
    /// confirmation after the image is saved. Any failure stops the run; the
    /// output image is only created after drawing succeeded.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        let config = &self.config;

        let dataset = load(&config.input)?.normalize_headers();
        writeln!(out, "Columns: {:?}", dataset.column_names()).map_err(stdout_err)?;

        let chart = apply_styling(render_series(&dataset)?);
        info!(
            "{} series over {} rows",
            chart.series.len(),
            dataset.len()
        );

        save_figure(&chart, &config.output, config.figure())?;
        writeln!(out, "✅ Plot saved as {}", config.output.display()).map_err(stdout_err)?;
        Ok(())
    }
}

fn stdout_err(source: std::io::Error) -> ChartError {
    ChartError::Io {
        path: "<stdout>".into(),
        source,
    }
}
