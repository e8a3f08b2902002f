pub mod comparator;
pub mod config;
pub mod errors;
pub mod generator;
pub mod metrics;
pub mod results;
pub mod runner;

pub use config::{BenchConfig, ConfigOverrides, StreamParams};
pub use errors::{DuelError, DuelResult};
pub use results::{BenchmarkReport, RunReport};
pub use runner::{benchmark, run, Strategy};
