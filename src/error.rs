use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Coarse classification of a [`ChartError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input table does not exist.
    FileNotFound,
    /// The input table exists but could not be turned into a dataset.
    Parse,
    /// Reading the input or writing the image failed.
    Io,
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("{}: file not found", path.display())]
    NotFound { path: PathBuf },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: malformed CSV: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: no columns to parse", path.display())]
    EmptyTable { path: PathBuf },

    #[error("column '{column}', row {row}: '{value}' is not a number")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },

    #[error("missing key column '{name}' (found {found:?})")]
    MissingKeyColumn { name: String, found: Vec<String> },

    #[error("drawing chart: {0}")]
    Render(String),

    #[error("{}: encoding image: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl ChartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChartError::NotFound { .. } => ErrorKind::FileNotFound,
            ChartError::Csv { .. }
            | ChartError::EmptyTable { .. }
            | ChartError::InvalidNumber { .. }
            | ChartError::MissingKeyColumn { .. } => ErrorKind::Parse,
            ChartError::Io { .. } | ChartError::Render(_) | ChartError::Encode { .. } => {
                ErrorKind::Io
            }
        }
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for ChartError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Render(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        let missing = ChartError::NotFound {
            path: PathBuf::from("times.csv"),
        };
        assert_eq!(missing.kind(), ErrorKind::FileNotFound);

        let bad = ChartError::InvalidNumber {
            column: "DP".into(),
            row: 3,
            value: "abc".into(),
        };
        assert_eq!(bad.kind(), ErrorKind::Parse);
        assert_eq!(
            bad.to_string(),
            "column 'DP', row 3: 'abc' is not a number"
        );

        let io = ChartError::Io {
            path: PathBuf::from("plot.png"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(io.kind(), ErrorKind::Io);
        assert_eq!(ChartError::Render("x".into()).kind(), ErrorKind::Io);
    }
}
