use std::path::PathBuf;

use crate::chart::render::Figure;

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Everything a run needs to know. The binary always uses [`Default`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Timing table to read.
    pub input: PathBuf,
    /// PNG file to write.
    pub output: PathBuf,
    /// Output resolution in dots per inch.
    pub dpi: u32,
    /// Figure width and height in inches, before cropping.
    pub figure_size: (f64, f64),
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("times.csv"),
            output: PathBuf::from("plot.png"),
            dpi: 300,
            figure_size: (6.4, 4.8),
        }
    }
}

impl ChartConfig {
    pub fn figure(&self) -> Figure {
        Figure::new(self.figure_size.0, self.figure_size.1, self.dpi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_benchmark_layout() {
        let config = ChartConfig::default();
        assert_eq!(config.input, PathBuf::from("times.csv"));
        assert_eq!(config.output, PathBuf::from("plot.png"));
        assert_eq!(config.figure().pixels(), (1920, 1440));
    }
}
