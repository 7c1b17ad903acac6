#[cfg(feature = "tracing")]
use tracing::debug;

use chartline_core::{Record, SortedSeries, TimeWindow, merge_by_key};
use chartline_types::{ChartlineConfig, ChartlineError, OutOfRangePolicy};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Builder for [`Chartline`].
#[derive(Debug, Clone)]
pub struct ChartlineBuilder {
    cfg: ChartlineConfig,
}

impl Default for ChartlineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartlineBuilder {
    /// Create a new builder with the default configuration.
    ///
    /// Defaults: `datetime` as both merge and datetime key, no lookback window,
    /// `OutOfRangePolicy::Fail`, UTC day boundaries.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cfg: ChartlineConfig::default(),
        }
    }

    /// Start from an existing (e.g. deserialized) configuration.
    #[must_use]
    pub const fn from_config(cfg: ChartlineConfig) -> Self {
        Self { cfg }
    }

    /// Field compared for equality when merging.
    #[must_use]
    pub fn merge_key(mut self, key: impl Into<String>) -> Self {
        self.cfg.merge_key = key.into();
        self
    }

    /// Field holding each record's datetime.
    #[must_use]
    pub fn datetime_key(mut self, key: impl Into<String>) -> Self {
        self.cfg.datetime_key = key.into();
        self
    }

    /// Use one field both to merge on and to order by.
    #[must_use]
    pub fn key(self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.merge_key(key.clone()).datetime_key(key)
    }

    /// Lookback window applied before merging (`"3m"`, `"2w"`, `"all"`, or an ISO date).
    ///
    /// The expression is validated by [`build`](Self::build).
    #[must_use]
    pub fn window(mut self, expr: impl Into<String>) -> Self {
        self.cfg.window = Some(expr.into());
        self
    }

    /// Behavior of `locate` when no record precedes the target.
    #[must_use]
    pub const fn out_of_range(mut self, policy: OutOfRangePolicy) -> Self {
        self.cfg.out_of_range = policy;
        self
    }

    /// Timezone used for calendar-day boundaries.
    #[must_use]
    pub const fn timezone(mut self, tz: Tz) -> Self {
        self.cfg.timezone = tz;
        self
    }

    /// Build the [`Chartline`] instance.
    ///
    /// # Errors
    /// Returns `ChartlineError::InvalidInput` if a key is empty or the window
    /// expression cannot be parsed.
    pub fn build(self) -> Result<Chartline, ChartlineError> {
        if self.cfg.merge_key.is_empty() {
            return Err(ChartlineError::invalid_input("merge key must not be empty"));
        }
        if self.cfg.datetime_key.is_empty() {
            return Err(ChartlineError::invalid_input(
                "datetime key must not be empty",
            ));
        }
        let window = self
            .cfg
            .window
            .as_deref()
            .map(str::parse::<TimeWindow>)
            .transpose()?;
        Ok(Chartline {
            cfg: self.cfg,
            window,
        })
    }
}

/// Applies a [`ChartlineConfig`] to the sorted-search and merge helpers.
#[derive(Debug, Clone)]
pub struct Chartline {
    cfg: ChartlineConfig,
    window: Option<TimeWindow>,
}

impl Chartline {
    /// Start building a new `Chartline` instance.
    #[must_use]
    pub fn builder() -> ChartlineBuilder {
        ChartlineBuilder::new()
    }

    /// The configuration this instance was built from.
    #[must_use]
    pub const fn config(&self) -> &ChartlineConfig {
        &self.cfg
    }

    /// The parsed lookback window, if one was configured.
    #[must_use]
    pub const fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    /// Wrap raw records as a sorted series using the configured datetime key.
    ///
    /// # Errors
    /// See [`SortedSeries::try_new`].
    pub fn prepare(&self, records: Vec<Record>) -> Result<SortedSeries, ChartlineError> {
        SortedSeries::try_new(records, &self.cfg.datetime_key)
    }

    /// Cutoff instant for the configured window, if any.
    #[must_use]
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.window.map(|w| w.cutoff(now))
    }

    /// Merge `series` on the configured merge key after trimming each one to
    /// the configured window.
    ///
    /// The output follows the longest trimmed series. Side records that find
    /// no home inside the spine's matching window are dropped.
    ///
    /// # Errors
    /// Returns `ChartlineError::InvalidInput` if `series` is empty.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "chartline::core::align",
            skip(self, series),
            fields(series_count = series.len(), merge_key = %self.cfg.merge_key),
        )
    )]
    pub fn align(
        &self,
        series: &[SortedSeries],
        now: DateTime<Utc>,
    ) -> Result<Vec<Record>, ChartlineError> {
        let Some(cutoff) = self.cutoff(now) else {
            return merge_by_key(series, &self.cfg.merge_key);
        };
        #[cfg(feature = "tracing")]
        debug!(%cutoff, "trimming series to window");
        let trimmed: Vec<&[Record]> = series.iter().map(|s| s.since(cutoff)).collect();
        merge_by_key(&trimmed, &self.cfg.merge_key)
    }

    /// Index of the rightmost record strictly before `target`, resolving the
    /// "nothing precedes target" case per the configured policy.
    ///
    /// # Errors
    /// - `ChartlineError::InvalidInput` if `series` is empty.
    /// - `ChartlineError::OutOfRange` if nothing precedes `target` and the policy is `Fail`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "chartline::core::locate",
            skip(self, series),
            fields(len = series.len()),
        )
    )]
    pub fn locate(
        &self,
        series: &SortedSeries,
        target: DateTime<Utc>,
    ) -> Result<usize, ChartlineError> {
        match chartline_core::locate(series, target) {
            Err(e)
                if e.is_out_of_range()
                    && self.cfg.out_of_range == OutOfRangePolicy::ClampToFirst =>
            {
                #[cfg(feature = "tracing")]
                debug!("no record precedes target; clamping to first");
                Ok(0)
            }
            other => other,
        }
    }

    /// Midnight of `now`'s day in the configured timezone, as UTC.
    ///
    /// # Errors
    /// See [`chartline_core::start_of_day`].
    pub fn start_of_day(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, ChartlineError> {
        chartline_core::start_of_day(now, self.cfg.timezone)
    }
}
