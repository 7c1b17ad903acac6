use chrono::{DateTime, Utc};

use crate::timeseries::sorted::SortedSeries;
use chartline_types::ChartlineError;

/// Index of the rightmost element of `history` whose key is strictly before `target`.
///
/// `history` must be ascending by `key`. A binary search converges on the
/// boundary between "before target" and "at or after target"; a correction
/// pass then steps left past any candidate at or after the target.
///
/// Returns `None` when `history` is empty or no element precedes `target`.
///
/// ```
/// use chartline_core::timeseries::search::locate_by;
///
/// let history = [1, 1, 3, 5];
/// assert_eq!(locate_by(&history, &3, |v| *v), Some(1));
/// assert_eq!(locate_by(&history, &9, |v| *v), Some(3));
/// assert_eq!(locate_by(&history, &1, |v| *v), None);
/// ```
pub fn locate_by<T, K, F>(history: &[T], target: &K, key: F) -> Option<usize>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let is_before = |i: usize| key(&history[i]) < *target;

    let last = history.len().checked_sub(1)?;
    let mut start = 0usize;
    let mut end = history.len();
    while start < end {
        let mid = start + (end - start) / 2;
        if is_before(mid) {
            start = mid + 1;
        } else {
            end = mid;
        }
    }

    // `start` is the first position at or after the target (or past the end).
    let mut candidate = start.min(last);
    while !is_before(candidate) {
        candidate = candidate.checked_sub(1)?;
    }
    Some(candidate)
}

/// Index of the rightmost record of `series` strictly before `target`.
///
/// # Errors
/// - `ChartlineError::InvalidInput` if `series` is empty.
/// - `ChartlineError::OutOfRange` if every record is at or after `target`.
pub fn locate(series: &SortedSeries, target: DateTime<Utc>) -> Result<usize, ChartlineError> {
    if series.is_empty() {
        return Err(ChartlineError::invalid_input(
            "cannot locate a datetime in an empty series",
        ));
    }
    locate_by(series.datetimes(), &target, |dt| *dt)
        .ok_or_else(|| ChartlineError::out_of_range(target))
}

/// Lowest index whose datetime equals `datetime` exactly.
#[must_use]
pub fn find_index_by_datetime(series: &SortedSeries, datetime: DateTime<Utc>) -> Option<usize> {
    let datetimes = series.datetimes();
    let idx = datetimes.partition_point(|dt| *dt < datetime);
    (datetimes.get(idx) == Some(&datetime)).then_some(idx)
}
