use crate::record::Record;
use chartline_types::ChartlineError;

/// Cursor over the spine positions a side series may still match.
///
/// The window covers spine indices `0..remaining`. It only ever shrinks:
/// every position `seek` inspects is removed from the window, whether it
/// matched or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchWindow {
    remaining: usize,
}

impl MatchWindow {
    /// A window spanning a whole spine of `spine_len` records.
    #[must_use]
    pub const fn new(spine_len: usize) -> Self {
        Self {
            remaining: spine_len,
        }
    }

    /// Rightmost spine index still searchable, or `None` once exhausted.
    #[must_use]
    pub const fn boundary(&self) -> Option<usize> {
        self.remaining.checked_sub(1)
    }

    /// Number of spine positions still searchable.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// True when no spine position is left to match against.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Walk leftward from the boundary until `is_match` accepts a position.
    ///
    /// On a hit the boundary moves one past the match (to its left) and the
    /// matched index is returned. On a miss the window ends up exhausted.
    pub fn seek<F>(&mut self, mut is_match: F) -> Option<usize>
    where
        F: FnMut(usize) -> bool,
    {
        while let Some(idx) = self.boundary() {
            self.remaining = idx;
            if is_match(idx) {
                return Some(idx);
            }
        }
        None
    }
}

/// Index of the longest series; the first one wins on equal lengths.
fn longest_index<T, S: AsRef<[T]>>(series: &[S]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, s) in series.iter().enumerate() {
        let len = s.as_ref().len();
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((i, len));
        }
    }
    best.map(|(i, _)| i)
}

/// Merge ascending series onto the longest one (the spine).
///
/// - The output has the spine's length and order; the spine is cloned and the
///   caller's series are never modified.
/// - Every other series is scanned from its last record to its first, matching
///   each record against the spine through a [`MatchWindow`] that starts at the
///   spine's end and only moves left.
/// - A matched spine record is replaced by `combine(spine_record, side_record)`.
/// - Once the window is exhausted, the remaining (earlier) records of that side
///   series are dropped. They are never appended to the output.
///
/// Both the spine and each side series must be ascending by the matched key;
/// otherwise matches are silently missed.
///
/// # Errors
/// Returns `ChartlineError::InvalidInput` if `series` is empty.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub fn merge_by<T, S, M, C>(series: &[S], same_key: M, combine: C) -> Result<Vec<T>, ChartlineError>
where
    T: Clone,
    S: AsRef<[T]>,
    M: Fn(&T, &T) -> bool,
    C: Fn(&T, &T) -> T,
{
    let spine_idx = longest_index::<T, S>(series)
        .ok_or_else(|| ChartlineError::invalid_input("no series to merge"))?;
    let mut spine: Vec<T> = series[spine_idx].as_ref().to_vec();

    for (i, side) in series.iter().enumerate() {
        if i == spine_idx {
            continue;
        }
        let mut window = MatchWindow::new(spine.len());
        for (pos, rec) in side.as_ref().iter().enumerate().rev() {
            let Some(idx) = window.seek(|idx| same_key(&spine[idx], rec)) else {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    series = i,
                    dropped = pos + 1,
                    "matching window exhausted; dropping earlier records"
                );
                break;
            };
            let merged = combine(&spine[idx], rec);
            spine[idx] = merged;
        }
    }

    Ok(spine)
}

/// Merge ascending record series on the field `merge_key`.
///
/// Matched spine records become the field union of the spine record and the
/// side record, side fields winning on collision. Records lacking `merge_key`
/// never match.
///
/// ```
/// use chartline_core::{Record, merge_by_key};
///
/// let a = vec![
///     Record::new().with("k", 1).with("a", "x"),
///     Record::new().with("k", 2).with("a", "y"),
/// ];
/// let b = vec![Record::new().with("k", 2).with("b", "z")];
///
/// let merged = merge_by_key(&[a, b], "k").unwrap();
/// assert_eq!(merged[0], Record::new().with("k", 1).with("a", "x"));
/// assert_eq!(merged[1], Record::new().with("k", 2).with("a", "y").with("b", "z"));
/// ```
///
/// # Errors
/// Returns `ChartlineError::InvalidInput` if `series` is empty.
pub fn merge_by_key<S>(series: &[S], merge_key: &str) -> Result<Vec<Record>, ChartlineError>
where
    S: AsRef<[Record]>,
{
    merge_by(
        series,
        |spine: &Record, side: &Record| spine.same_value(side, merge_key),
        Record::overlay,
    )
}
