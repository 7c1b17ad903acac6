//! The `Record` type: an insertion-ordered field map backed by `serde_json`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One data point of a series: field name to JSON-like value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert of a single field.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Insert or replace a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrow the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the record into the underlying map.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Decode `field` as a UTC datetime.
    ///
    /// Accepted encodings:
    /// - RFC 3339 strings (`2024-01-02T03:04:05Z`, any offset);
    /// - plain `YYYY-MM-DD` strings, taken as midnight UTC;
    /// - finite numbers, taken as Unix epoch milliseconds (fractions truncated).
    ///
    /// Returns `None` for a missing field or any other encoding.
    #[must_use]
    pub fn datetime(&self, field: &str) -> Option<DateTime<Utc>> {
        match self.0.get(field)? {
            Value::String(s) => parse_datetime(s),
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .and_then(DateTime::from_timestamp_millis),
            _ => None,
        }
    }

    /// Field union of `self` and `other`; `other` wins on collisions.
    ///
    /// Fields keep `self`'s order, followed by fields only `other` carries.
    #[must_use]
    pub fn overlay(&self, other: &Self) -> Self {
        let mut out = self.0.clone();
        for (k, v) in &other.0 {
            out.insert(k.clone(), v.clone());
        }
        Self(out)
    }

    /// True when both records carry `field` with equal values.
    ///
    /// Numbers compare by value, so `2` and `2.0` are equal. A record without
    /// the field matches nothing, not even another record that also lacks it.
    #[must_use]
    pub fn same_value(&self, other: &Self, field: &str) -> bool {
        match (self.0.get(field), other.0.get(field)) {
            (Some(a), Some(b)) => values_equal(a, b),
            _ => false,
        }
    }
}

/// Structural equality, except numbers compare numerically across integer
/// and float encodings.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else if x.is_f64() || y.is_f64() {
                x.as_f64() == y.as_f64()
            } else {
                // one side negative, the other above i64::MAX
                false
            }
        }
        _ => a == b,
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub(crate) fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl TryFrom<Value> for Record {
    type Error = chartline_types::ChartlineError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(chartline_types::ChartlineError::data(format!(
                "expected a JSON object for a record, got {other}"
            ))),
        }
    }
}
