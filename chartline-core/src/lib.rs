//! chartline-core
//!
//! Data-shaping helpers behind chart rendering: records keyed by field name,
//! sorted datetime search, and alignment of several time series onto one.
//!
//! - `record`: the `Record` field map and its datetime decoding.
//! - `timeseries`: `SortedSeries`, `locate`, `merge_by_key`, and lookback windows.
//!
//! Every operation is synchronous and allocation-bounded by its inputs; inputs
//! are borrowed and never modified.
#![warn(missing_docs)]

pub mod record;
/// Time-series search, merge, and windowing utilities.
pub mod timeseries;

pub use chartline_types::{ChartlineConfig, ChartlineError, OutOfRangePolicy};
pub use record::Record;
pub use timeseries::merge::{MatchWindow, merge_by, merge_by_key};
pub use timeseries::search::{find_index_by_datetime, locate, locate_by};
pub use timeseries::sorted::SortedSeries;
pub use timeseries::window::{TimeWindow, start_of_day};
