//! Configuration types shared by the core helpers and the `chartline` facade.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Field name used by default for both merging and ordering.
pub const DEFAULT_KEY: &str = "datetime";

/// Behavior of a datetime search when no record precedes the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum OutOfRangePolicy {
    /// Surface `ChartlineError::OutOfRange` to the caller.
    #[default]
    Fail,
    /// Resolve to the first record of the series.
    ClampToFirst,
}

/// Global configuration for the `Chartline` facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartlineConfig {
    /// Field compared for equality when merging series.
    pub merge_key: String,
    /// Field holding each record's datetime, used for ordering and search.
    pub datetime_key: String,
    /// Optional lookback window (`"3m"`, `"2w"`, `"all"`, or an ISO date).
    ///
    /// When set, records before the resulting cutoff are excluded before merging.
    pub window: Option<String>,
    /// What `locate` does when every record is at or after the target.
    pub out_of_range: OutOfRangePolicy,
    /// Timezone used to compute calendar-day boundaries.
    pub timezone: Tz,
}

impl Default for ChartlineConfig {
    fn default() -> Self {
        Self {
            merge_key: DEFAULT_KEY.to_string(),
            datetime_key: DEFAULT_KEY.to_string(),
            window: None,
            out_of_range: OutOfRangePolicy::default(),
            timezone: Tz::UTC,
        }
    }
}
