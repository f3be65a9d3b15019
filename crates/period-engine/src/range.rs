//! Date ranges and their `YYYY-MM-DD/YYYY-MM-DD` wire format.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{self, midnight};
use crate::error::{PeriodError, Result};

/// Separator between the two dates of a range string.
pub const RANGE_SEPARATOR: char = '/';

/// Date format of each half of a range string.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive `{start, end}` span.
///
/// The boundary type defaults to a UTC instant; the same shape carries
/// calendar days ([`NaiveDate`]) and preformatted strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange<T = DateTime<Utc>> {
    pub start: T,
    pub end: T,
}

impl<T> DateRange<T> {
    pub const fn new(start: T, end: T) -> Self {
        Self { start, end }
    }
}

impl DateRange {
    /// Range covering the calendar days `start..=end`, at UTC midnight.
    pub fn from_days(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(midnight(start), midnight(end))
    }

    /// Calendar days from `start` to `end` (a one-day range is 0).
    pub fn days_between(&self) -> i64 {
        calendar::days_between(self.start, self.end)
    }

    /// Whether `value`'s day falls inside the range, both ends included.
    pub fn contains(&self, value: DateTime<Utc>) -> bool {
        !calendar::is_before_day(value, self.start) && !calendar::is_before_day(self.end, value)
    }

    /// Both boundaries as calendar days.
    pub fn to_calendar(&self) -> DateRange<NaiveDate> {
        DateRange::new(self.start.date_naive(), self.end.date_naive())
    }

    /// Both boundaries rendered with a chrono format string.
    pub fn format(&self, fmt: &str) -> DateRange<String> {
        DateRange::new(
            self.start.format(fmt).to_string(),
            self.end.format(fmt).to_string(),
        )
    }

    /// Fail with [`PeriodError::InvalidRange`] when `end` is before `start`.
    pub fn ensure_ordered(&self) -> Result<()> {
        if self.end < self.start {
            return Err(PeriodError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{RANGE_SEPARATOR}{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

impl FromStr for DateRange {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self> {
        parse_date_range_string(s)
    }
}

/// Split a range string into its two raw halves without parsing them.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidRangeString`] unless the input is exactly
/// two non-empty parts joined by `/`.
pub fn date_range_split(s: &str) -> Result<DateRange<String>> {
    let mut parts = s.trim().split(RANGE_SEPARATOR).map(str::trim);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), None) if !start.is_empty() && !end.is_empty() => {
            Ok(DateRange::new(start.to_string(), end.to_string()))
        }
        _ => Err(PeriodError::InvalidRangeString(format!(
            "expected 'YYYY-MM-DD{RANGE_SEPARATOR}YYYY-MM-DD', got '{}'",
            s.trim()
        ))),
    }
}

/// Parse a `YYYY-MM-DD/YYYY-MM-DD` string into a UTC-midnight range.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidRangeString`] if either half is not an ISO
/// date or the end precedes the start.
///
/// # Examples
///
/// ```
/// use period_engine::range::{date_range_to_string, parse_date_range_string};
///
/// let range = parse_date_range_string("2024-01-01/2024-03-31").unwrap();
/// assert_eq!(range.days_between(), 90);
/// assert_eq!(date_range_to_string(&range), "2024-01-01/2024-03-31");
/// ```
pub fn parse_date_range_string(s: &str) -> Result<DateRange> {
    let raw = date_range_split(s)?;
    let start = parse_day(&raw.start)?;
    let end = parse_day(&raw.end)?;
    if end < start {
        return Err(PeriodError::InvalidRangeString(format!(
            "'{}': end is before start",
            s.trim()
        )));
    }
    Ok(DateRange::from_days(start, end))
}

/// Render a range in the `YYYY-MM-DD/YYYY-MM-DD` wire format.
pub fn date_range_to_string(range: &DateRange) -> String {
    range.to_string()
}

fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| PeriodError::InvalidRangeString(format!("'{s}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    // ── parsing ─────────────────────────────────────────────────────────

    #[test]
    fn test_parse_range_string() {
        let range = parse_date_range_string("2024-01-01/2024-01-31").unwrap();
        assert_eq!(range.start, day(2024, 1, 1));
        assert_eq!(range.end, day(2024, 1, 31));
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        let range: DateRange = " 2024-02-01 / 2024-02-29 ".parse().unwrap();
        assert_eq!(range.end, day(2024, 2, 29));
    }

    #[test]
    fn test_parse_single_day_range() {
        let range = parse_date_range_string("2024-05-05/2024-05-05").unwrap();
        assert_eq!(range.days_between(), 0);
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let err = parse_date_range_string("2024-01-01").unwrap_err().to_string();
        assert!(err.contains("Invalid range string"), "got: {err}");
    }

    #[test]
    fn test_parse_rejects_extra_parts() {
        assert!(parse_date_range_string("2024-01-01/2024-01-02/2024-01-03").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_dates() {
        assert!(parse_date_range_string("2023-02-29/2023-03-01").is_err());
        assert!(parse_date_range_string("yesterday/today").is_err());
    }

    #[test]
    fn test_parse_rejects_inverted_range() {
        let err = parse_date_range_string("2024-02-01/2024-01-01")
            .unwrap_err()
            .to_string();
        assert!(err.contains("end is before start"), "got: {err}");
    }

    #[test]
    fn test_split_keeps_raw_halves() {
        let raw = date_range_split("2024-01-01/2024-12-31").unwrap();
        assert_eq!(raw, DateRange::new("2024-01-01".to_string(), "2024-12-31".to_string()));
    }

    #[test]
    fn test_split_rejects_empty_half() {
        assert!(date_range_split("2024-01-01/").is_err());
        assert!(date_range_split("/2024-01-01").is_err());
    }

    // ── rendering and helpers ───────────────────────────────────────────

    #[test]
    fn test_round_trip() {
        let range = DateRange::new(day(2023, 4, 1), day(2024, 3, 31));
        let s = date_range_to_string(&range);
        assert_eq!(s, "2023-04-01/2024-03-31");
        assert_eq!(parse_date_range_string(&s).unwrap(), range);
    }

    #[test]
    fn test_contains_is_inclusive_and_day_granular() {
        let range = DateRange::new(day(2024, 1, 1), day(2024, 1, 31));
        assert!(range.contains(day(2024, 1, 1)));
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 1, 31, 18, 0, 0).unwrap()));
        assert!(!range.contains(day(2024, 2, 1)));
        assert!(!range.contains(day(2023, 12, 31)));
    }

    #[test]
    fn test_to_calendar_and_format() {
        let range = DateRange::new(day(2024, 6, 2), day(2024, 6, 8));
        let cal = range.to_calendar();
        assert_eq!(cal.start, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(range.format("%d/%m").end, "08/06");
    }

    #[test]
    fn test_ensure_ordered() {
        assert!(DateRange::new(day(2024, 1, 1), day(2024, 1, 1)).ensure_ordered().is_ok());
        let err = DateRange::new(day(2024, 1, 2), day(2024, 1, 1)).ensure_ordered();
        assert!(matches!(err, Err(PeriodError::InvalidRange { .. })));
    }

    #[test]
    fn test_serializes_as_rfc3339_boundaries() {
        let range = DateRange::new(day(2024, 1, 1), day(2024, 1, 7));
        let json = serde_json::to_value(range).unwrap();
        assert_eq!(json["start"], "2024-01-01T00:00:00Z");
        assert_eq!(json["end"], "2024-01-07T00:00:00Z");
    }
}
