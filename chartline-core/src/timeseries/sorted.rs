use chrono::{DateTime, Utc};

use crate::record::Record;
use crate::timeseries::search::locate_by;
use chartline_types::ChartlineError;

/// A series of records known to be ascending by a datetime field.
///
/// Datetimes are decoded once at construction so searches never re-parse
/// record fields. Adjacent records may share a datetime.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedSeries {
    datetime_key: String,
    records: Vec<Record>,
    datetimes: Vec<DateTime<Utc>>,
}

impl SortedSeries {
    /// Build a series after checking that every record carries a datetime and
    /// that datetimes never decrease.
    ///
    /// # Errors
    /// - `ChartlineError::Data` if a record has no decodable `datetime_key`.
    /// - `ChartlineError::InvalidInput` if a record is earlier than its predecessor.
    pub fn try_new(records: Vec<Record>, datetime_key: &str) -> Result<Self, ChartlineError> {
        let mut datetimes = Vec::with_capacity(records.len());
        for (i, r) in records.iter().enumerate() {
            let dt = r.datetime(datetime_key).ok_or_else(|| {
                ChartlineError::data(format!(
                    "record {i} has no decodable `{datetime_key}` field"
                ))
            })?;
            if let Some(prev) = datetimes.last()
                && *prev > dt
            {
                return Err(ChartlineError::invalid_input(format!(
                    "series not ascending by `{datetime_key}`: record {i} ({dt}) precedes record {} ({prev})",
                    i - 1
                )));
            }
            datetimes.push(dt);
        }
        Ok(Self {
            datetime_key: datetime_key.to_string(),
            records,
            datetimes,
        })
    }

    /// Build a series from records and their already-decoded datetimes without
    /// validating order. Debug builds still assert ascending order.
    ///
    /// If the two vectors differ in length, both are truncated to the shorter
    /// one. The caller guarantees `datetimes` is ascending; searches on a
    /// violating series return unspecified (but in-bounds) results.
    #[must_use]
    pub fn from_sorted_unchecked(
        mut records: Vec<Record>,
        mut datetimes: Vec<DateTime<Utc>>,
        datetime_key: &str,
    ) -> Self {
        let len = records.len().min(datetimes.len());
        records.truncate(len);
        datetimes.truncate(len);
        debug_assert!(datetimes.windows(2).all(|w| w[0] <= w[1]));
        Self {
            datetime_key: datetime_key.to_string(),
            records,
            datetimes,
        }
    }

    /// Field the datetimes were decoded from.
    #[must_use]
    pub fn datetime_key(&self) -> &str {
        &self.datetime_key
    }

    /// Records in ascending datetime order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Decoded datetimes, parallel to `records()`.
    #[must_use]
    pub fn datetimes(&self) -> &[DateTime<Utc>] {
        &self.datetimes
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the series holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the series into its records.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Records at or after `cutoff`.
    ///
    /// Returns the whole series when no record precedes the cutoff.
    #[must_use]
    pub fn since(&self, cutoff: DateTime<Utc>) -> &[Record] {
        let start = locate_by(&self.datetimes, &cutoff, |dt| *dt).map_or(0, |i| i + 1);
        self.records.get(start..).unwrap_or(&[])
    }
}

impl AsRef<[Record]> for SortedSeries {
    fn as_ref(&self) -> &[Record] {
        &self.records
    }
}
