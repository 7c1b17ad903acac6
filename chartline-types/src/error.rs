use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the chartline workspace.
///
/// Covers caller mistakes (empty inputs, unsorted series, malformed window
/// expressions), searches that fall before the start of a series, and records
/// whose contents cannot be interpreted.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChartlineError {
    /// Invalid input argument (empty series set, unsorted series, bad expression).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No record in the searched series lies strictly before the target.
    #[error("no record precedes {target}")]
    OutOfRange {
        /// The datetime that was searched for.
        target: DateTime<Utc>,
    },

    /// Issues with record contents (missing or undecodable fields).
    #[error("data issue: {0}")]
    Data(String),
}

impl ChartlineError {
    /// Helper: build an `InvalidInput` error from a message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Helper: build an `OutOfRange` error for the searched datetime.
    #[must_use]
    pub const fn out_of_range(target: DateTime<Utc>) -> Self {
        Self::OutOfRange { target }
    }

    /// Helper: build a `Data` error from a message.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Returns true when the error signals a search that fell before the first record.
    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}
