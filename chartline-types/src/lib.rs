//! Chartline-specific error and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;

pub use config::{ChartlineConfig, DEFAULT_KEY, OutOfRangePolicy};
pub use error::ChartlineError;
