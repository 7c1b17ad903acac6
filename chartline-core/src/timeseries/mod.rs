//! Time-series utilities for chart data preparation.
//!
//! Modules include:
//! - `sorted`: the `SortedSeries` wrapper that makes ascending order explicit
//! - `search`: binary search for the record preceding a datetime
//! - `merge`: merge multiple ascending series onto the longest one
//! - `window`: parse lookback windows into cutoff instants
/// Windowed, right-to-left merging of ascending series.
pub mod merge;
/// Datetime search over ascending series.
pub mod search;
/// Ascending-by-datetime series wrapper.
pub mod sorted;
pub mod window;
