//! Weekday-preserving comparison offsets.
//!
//! A comparison boundary is always the current boundary minus a whole number
//! of weeks. Subtracting a calendar month or quarter directly would land on
//! a different weekday and let day-of-week seasonality leak into
//! period-over-period change; whole weeks keep the weekday fixed.

use chrono::{DateTime, Utc};

use crate::calendar::{is_before_day, start_of, subtract, TimeUnit};
use crate::range::DateRange;

/// Offset, in whole weeks, for a quarter boundary.
///
/// A quarter is ~13.04 weeks, so the naive 13-week offset can leave the end
/// of a 92-day quarter (Q3, Q4) on its own first day. When the candidate has
/// not escaped `boundary`'s quarter it sits within the 7-day window following
/// the quarter start, and one more week is taken.
pub fn quarter_offset(boundary: DateTime<Utc>) -> i64 {
    let naive = TimeUnit::Quarter.whole_weeks(1);
    let candidate = subtract(boundary, naive, TimeUnit::Week);
    if is_before_day(candidate, start_of(TimeUnit::Quarter, boundary)) {
        naive
    } else {
        naive + 1
    }
}

/// Shift `boundary` back by `weeks` whole weeks.
pub fn shift_back(boundary: DateTime<Utc>, weeks: i64) -> DateTime<Utc> {
    subtract(boundary, weeks, TimeUnit::Week)
}

/// Shift both ends of `range` back by the offset resolved at its `end`.
///
/// Using one offset for both ends keeps the span identical; resolving it at
/// the end keeps the comparison range from reaching into the current one.
pub fn shift_range(range: &DateRange, offset: impl Fn(DateTime<Utc>) -> i64) -> DateRange {
    let weeks = offset(range.end);
    DateRange::new(shift_back(range.start, weeks), shift_back(range.end, weeks))
}
