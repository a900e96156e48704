//! Plot matrix chain multiplication timings (divide-and-conquer vs dynamic
//! programming) from `times.csv` into `plot.png`.

pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod generator;

pub use config::ChartConfig;
pub use error::{ChartError, ErrorKind};
pub use generator::ChartGenerator;
