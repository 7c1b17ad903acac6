//! Chartline aligns independently-sourced time series for chart rendering.
//!
//! Overview
//! - Wraps raw records into ascending [`SortedSeries`] using a configured datetime field.
//! - Trims each series to an optional lookback window (`"3m"`, `"2w"`, `"all"`, ISO date).
//! - Merges the trimmed series onto the longest one with a monotonic matching
//!   window, so every chart point carries the fields of every source sharing its key.
//! - Locates the record preceding a datetime by binary search.
//!
//! Key behaviors and trade-offs
//! - Merge output has exactly the longest series' length and order. Side records
//!   without a home inside the matching window are dropped rather than appended.
//! - Inputs must be ascending by the merge key; `SortedSeries` enforces ascending
//!   datetimes at construction.
//! - `locate` fails with `OutOfRange` when nothing precedes the target, unless
//!   `OutOfRangePolicy::ClampToFirst` is configured.
//!
//! Example
//! ```
//! use chartline::{Chartline, Record};
//! use chrono::{DateTime, Utc};
//!
//! let chart = Chartline::builder().key("datetime").window("2d").build()?;
//!
//! let prices = chart.prepare(vec![
//!     Record::new().with("datetime", "2024-01-01").with("price", 1.0),
//!     Record::new().with("datetime", "2024-01-02").with("price", 2.0),
//!     Record::new().with("datetime", "2024-01-03").with("price", 3.0),
//! ])?;
//! let volume = chart.prepare(vec![
//!     Record::new().with("datetime", "2024-01-03").with("volume", 30),
//! ])?;
//!
//! let now: DateTime<Utc> = "2024-01-04T00:00:00Z".parse()?;
//! let merged = chart.align(&[prices, volume], now)?;
//! assert_eq!(merged.len(), 2);
//! assert_eq!(merged[1].get("volume"), Some(&30.into()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![warn(missing_docs)]

mod core;

pub use crate::core::{Chartline, ChartlineBuilder};
pub use chartline_core::{
    ChartlineConfig, ChartlineError, MatchWindow, OutOfRangePolicy, Record, SortedSeries,
    TimeWindow, find_index_by_datetime, locate, locate_by, merge_by, merge_by_key, start_of_day,
};
