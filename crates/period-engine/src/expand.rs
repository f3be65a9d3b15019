//! Range expansion and splitting.
//!
//! Report builders iterate a resolved range day by day, re-bucket it into
//! calendar months, or split it into day/week/month/year buckets. All three
//! reject an inverted range with [`PeriodError::InvalidRange`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{add, days_between, end_of_day, start_of, subtract, TimeUnit};
use crate::error::{PeriodError, Result};
use crate::range::DateRange;

/// Bucket size for [`date_range_to_granularity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }

    fn unit(self) -> TimeUnit {
        match self {
            Granularity::Day => TimeUnit::Day,
            Granularity::Week => TimeUnit::Week,
            Granularity::Month => TimeUnit::Month,
            Granularity::Year => TimeUnit::Year,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Ok(Granularity::Day),
            "week" | "weekly" => Ok(Granularity::Week),
            "month" | "monthly" => Ok(Granularity::Month),
            "year" | "yearly" => Ok(Granularity::Year),
            _ => Err(PeriodError::InvalidGranularity(format!("'{}'", s.trim()))),
        }
    }
}

// ── Days ────────────────────────────────────────────────────────────────────

/// Every calendar day from `range.start` up to `range.end`.
///
/// `end` itself is only included when `inclusive` is set, so a one-day
/// inclusive range yields exactly one date.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidRange`] if `end` is before `start`.
pub fn dates_from_date_range(range: &DateRange, inclusive: bool) -> Result<Vec<DateTime<Utc>>> {
    range.ensure_ordered()?;
    let count = days_between(range.start, range.end) + i64::from(inclusive);
    Ok((0..count)
        .map(|offset| add(range.start, offset, TimeUnit::Day))
        .collect())
}

/// [`dates_from_date_range`], rendered with a chrono format string.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidRange`] if `end` is before `start`.
pub fn dates_from_date_range_formatted(
    range: &DateRange,
    format: &str,
    inclusive: bool,
) -> Result<Vec<String>> {
    Ok(dates_from_date_range(range, inclusive)?
        .into_iter()
        .map(|date| date.format(format).to_string())
        .collect())
}

// ── Months ──────────────────────────────────────────────────────────────────

/// One full calendar month per month the range touches.
///
/// Months run from `start`'s month up to `end`'s month, which is only
/// included when `inclusive` is set. The first month is never clamped to
/// `start`. With `exact_end_date`, the last month's end is clamped to
/// `range.end`.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidRange`] if `end` is before `start`.
pub fn months_from_date_range(
    range: &DateRange,
    inclusive: bool,
    exact_end_date: bool,
) -> Result<Vec<DateRange>> {
    range.ensure_ordered()?;
    let first = start_of(TimeUnit::Month, range.start);
    let last = start_of(TimeUnit::Month, range.end);
    let count = i64::from(last.year() - first.year()) * 12
        + i64::from(last.month())
        - i64::from(first.month())
        + i64::from(inclusive);

    let mut months: Vec<DateRange> = (0..count)
        .map(|offset| {
            let month_start = add(first, offset, TimeUnit::Month);
            let month_end = subtract(add(month_start, 1, TimeUnit::Month), 1, TimeUnit::Day);
            DateRange::new(month_start, month_end)
        })
        .collect();

    if exact_end_date {
        if let Some(last_month) = months.last_mut() {
            last_month.end = last_month.end.min(range.end);
        }
    }
    Ok(months)
}

// ── Granularity buckets ─────────────────────────────────────────────────────

/// Split the range into successive `granularity`-sized buckets.
///
/// Buckets start exactly at `range.start` (not aligned to the calendar
/// unit). Each bucket ends 1 ms before the next one begins, and the final
/// bucket ends exactly at the range end. A range whose end falls on a
/// bucket boundary gets a final single-instant bucket for that boundary.
/// With `inclusive`, the range end is extended to the last millisecond of
/// its day.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidRange`] if `end` is before `start`.
///
/// # Examples
///
/// ```
/// use period_engine::expand::{date_range_to_granularity, Granularity};
/// use period_engine::range::parse_date_range_string;
///
/// let range = parse_date_range_string("2024-01-01/2024-01-10").unwrap();
/// let buckets = date_range_to_granularity(&range, Granularity::Day, false).unwrap();
/// assert_eq!(buckets.len(), 10);
/// assert_eq!(buckets.last().unwrap().end, range.end);
/// ```
pub fn date_range_to_granularity(
    range: &DateRange,
    granularity: Granularity,
    inclusive: bool,
) -> Result<Vec<DateRange>> {
    range.ensure_ordered()?;
    let end = if inclusive {
        end_of_day(range.end)
    } else {
        range.end
    };
    let unit = granularity.unit();

    let mut buckets = Vec::new();
    let mut index = 0;
    loop {
        // Offsets are taken from the range start so month clamping
        // (Jan 31 → Feb 29) does not drift into later buckets.
        let bucket_start = add(range.start, index, unit);
        if bucket_start > end {
            break;
        }
        let next = add(range.start, index + 1, unit);
        // `add` saturates at the top of the representable range, so a
        // bucket that cannot advance is the last one.
        if next > end || next <= bucket_start {
            buckets.push(DateRange::new(bucket_start, end));
            break;
        }
        buckets.push(DateRange::new(bucket_start, next - Duration::milliseconds(1)));
        index += 1;
    }
    Ok(buckets)
}

/// [`date_range_to_granularity`], with both bucket boundaries rendered with
/// a chrono format string.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidRange`] if `end` is before `start`.
pub fn date_range_to_granularity_formatted(
    range: &DateRange,
    granularity: Granularity,
    format: &str,
    inclusive: bool,
) -> Result<Vec<DateRange<String>>> {
    Ok(date_range_to_granularity(range, granularity, inclusive)?
        .iter()
        .map(|bucket| bucket.format(format))
        .collect())
}
