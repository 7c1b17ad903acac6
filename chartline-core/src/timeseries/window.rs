//! Lookback windows: turn `"3m"`, `"2w"`, `"all"` or an ISO date into a cutoff instant.

use core::str::FromStr;

use chrono::{DateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::record::parse_datetime;
use chartline_types::ChartlineError;

/// Days covered by the `all` window.
pub const ALL_DAYS: i64 = 2 * 12 * 30;
/// Days in a `m` (month) unit.
pub const DAYS_PER_MONTH: i64 = 30;
/// Seconds in a `y` (year) unit: 365.25 days.
pub const SECONDS_PER_YEAR: i64 = 31_557_600;

const MS_PER_DAY: i64 = 86_400_000;

/// A window of history ending now, or starting at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    /// Everything at or after a fixed instant.
    Since(DateTime<Utc>),
    /// Everything within a span before "now".
    Lookback(TimeDelta),
}

impl TimeWindow {
    /// Instant before which records fall outside the window.
    ///
    /// A lookback reaching past the representable range saturates at the
    /// earliest representable instant.
    #[must_use]
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match *self {
            Self::Since(at) => at,
            Self::Lookback(span) => now
                .checked_sub_signed(span)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        }
    }
}

impl Default for TimeWindow {
    /// One year of history.
    fn default() -> Self {
        Self::Lookback(TimeDelta::seconds(SECONDS_PER_YEAR))
    }
}

impl FromStr for TimeWindow {
    type Err = ChartlineError;

    /// Accepts an RFC 3339 timestamp, a `YYYY-MM-DD` date, `all`, or
    /// `<n><unit>` where `n` defaults to 1 and may be fractional (`1.5h`).
    /// Units: `ms`, `s`, `min`, `h`, `d`, `w`, `m` (30 days), `y` (365.25 days),
    /// plus their long forms. Units are case-insensitive except that an
    /// uppercase `M` means minutes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ChartlineError::invalid_input("empty time window"));
        }
        if let Some(at) = parse_datetime(s) {
            return Ok(Self::Since(at));
        }

        let (amount, unit) = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .map_or((s, ""), |i| s.split_at(i));
        let unit = unit.trim();
        if unit.is_empty() {
            return Err(ChartlineError::invalid_input(format!(
                "time window `{s}` has no unit"
            )));
        }
        let unit = if unit == "m" {
            "mo".to_string()
        } else {
            unit.to_ascii_lowercase()
        };

        let unit_ms = match unit.as_str() {
            "all" => return Ok(Self::Lookback(TimeDelta::days(ALL_DAYS))),
            "mo" | "month" | "months" => DAYS_PER_MONTH * MS_PER_DAY,
            "w" | "wk" | "week" | "weeks" => 7 * MS_PER_DAY,
            "d" | "day" | "days" => MS_PER_DAY,
            "h" | "hr" | "hrs" | "hour" | "hours" => 3_600_000,
            "m" | "min" | "mins" | "minute" | "minutes" => 60_000,
            "s" | "sec" | "secs" | "second" | "seconds" => 1_000,
            "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1,
            "y" | "yr" | "yrs" | "year" | "years" => SECONDS_PER_YEAR * 1_000,
            other => {
                return Err(ChartlineError::invalid_input(format!(
                    "unknown time window unit `{other}` in `{s}`"
                )));
            }
        };

        let invalid_amount =
            || ChartlineError::invalid_input(format!("time window `{s}` has an invalid amount"));
        let millis = if amount.is_empty() {
            Some(unit_ms)
        } else if amount.contains('.') {
            let n: f64 = amount.parse().map_err(|_| invalid_amount())?;
            let ms = (n * unit_ms as f64).round();
            (ms.is_finite() && ms < i64::MAX as f64).then(|| ms as i64)
        } else {
            let n: i64 = amount.parse().map_err(|_| invalid_amount())?;
            n.checked_mul(unit_ms)
        };

        millis
            .and_then(TimeDelta::try_milliseconds)
            .map(Self::Lookback)
            .ok_or_else(|| {
                ChartlineError::invalid_input(format!("time window `{s}` is out of range"))
            })
    }
}

/// Midnight of `now`'s calendar day in `tz`, expressed in UTC.
///
/// # Errors
/// Returns `ChartlineError::Data` if that local midnight does not exist in
/// `tz` (a DST gap at 00:00).
pub fn start_of_day(now: DateTime<Utc>, tz: Tz) -> Result<DateTime<Utc>, ChartlineError> {
    let midnight = now.with_timezone(&tz).date_naive().and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            ChartlineError::data(format!(
                "midnight of {} does not exist in {tz}",
                midnight.date()
            ))
        })
}
