//! Calendar arithmetic over UTC-anchored instants.
//!
//! Every period computation in this crate goes through these helpers, so the
//! chrono backend stays an implementation detail. Weeks start on Sunday, the
//! reporting convention used by the period registry.
//!
//! Arithmetic saturates at the edges of the representable range instead of
//! panicking; nothing in a reporting workload gets near them.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Mean Gregorian year length over the 400-year cycle.
const DAYS_PER_YEAR: f64 = 146_097.0 / 400.0;

/// A calendar unit that dates can be truncated to or shifted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl TimeUnit {
    /// Average length of one unit, in days.
    pub fn average_days(self) -> f64 {
        match self {
            TimeUnit::Day => 1.0,
            TimeUnit::Week => 7.0,
            TimeUnit::Month => DAYS_PER_YEAR / 12.0,
            TimeUnit::Quarter => DAYS_PER_YEAR / 4.0,
            TimeUnit::Year => DAYS_PER_YEAR,
        }
    }

    /// Whole weeks contained in `count` units, rounded down.
    ///
    /// One month is ~4.35 weeks (4), one quarter ~13.04 (13), one year
    /// ~52.18 (52).
    pub fn whole_weeks(self, count: i64) -> i64 {
        (self.average_days() * count as f64 / 7.0).floor() as i64
    }

    fn months(self) -> Option<i64> {
        match self {
            TimeUnit::Month => Some(1),
            TimeUnit::Quarter => Some(3),
            TimeUnit::Year => Some(12),
            TimeUnit::Day | TimeUnit::Week => None,
        }
    }
}

/// The instant at 00:00:00.000 UTC on `date`.
pub fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Truncate `value` to the first instant of its enclosing `unit`.
pub fn start_of(unit: TimeUnit, value: DateTime<Utc>) -> DateTime<Utc> {
    let date = value.date_naive();
    let start = match unit {
        TimeUnit::Day => date,
        TimeUnit::Week => shift_days(date, -i64::from(date.weekday().num_days_from_sunday())),
        TimeUnit::Month => first_of_month(date.year(), date.month()).unwrap_or(date),
        TimeUnit::Quarter => {
            let month = (date.month0() / 3) * 3 + 1;
            first_of_month(date.year(), month).unwrap_or(date)
        }
        TimeUnit::Year => first_of_month(date.year(), 1).unwrap_or(date),
    };
    midnight(start)
}

/// The last millisecond of `value`'s day, never earlier than `value`.
pub fn end_of_day(value: DateTime<Utc>) -> DateTime<Utc> {
    let end = add(start_of(TimeUnit::Day, value), 1, TimeUnit::Day) - Duration::milliseconds(1);
    end.max(value)
}

/// Shift `value` by `amount` units. Month-based units clamp to the last day
/// of the target month (Jan 31 + 1 month = Feb 28/29).
pub fn add(value: DateTime<Utc>, amount: i64, unit: TimeUnit) -> DateTime<Utc> {
    let saturated = if amount < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    };

    match unit.months() {
        None => {
            let days = if unit == TimeUnit::Week {
                amount.saturating_mul(7)
            } else {
                amount
            };
            Duration::try_days(days)
                .and_then(|delta| value.checked_add_signed(delta))
                .unwrap_or(saturated)
        }
        Some(per_unit) => {
            let months = amount.saturating_mul(per_unit);
            let shifted = u32::try_from(months.unsigned_abs()).ok().and_then(|n| {
                if months < 0 {
                    value.checked_sub_months(Months::new(n))
                } else {
                    value.checked_add_months(Months::new(n))
                }
            });
            shifted.unwrap_or(saturated)
        }
    }
}

/// Shift `value` back by `amount` units.
pub fn subtract(value: DateTime<Utc>, amount: i64, unit: TimeUnit) -> DateTime<Utc> {
    add(value, amount.saturating_neg(), unit)
}

/// Whether `a` falls on the same UTC calendar day as `b`.
pub fn is_same_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}

/// Whether `a` falls on an earlier UTC calendar day than `b`.
pub fn is_before_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() < b.date_naive()
}

/// Calendar days from `a` to `b` (negative if `b` is earlier).
pub fn days_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    (b.date_naive() - a.date_naive()).num_days()
}

/// Whether `value` carries no time-of-day component.
pub fn is_start_of_day(value: DateTime<Utc>) -> bool {
    value.time() == NaiveTime::MIN
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        at(y, m, d, 0)
    }

    // ── start_of ────────────────────────────────────────────────────────

    #[test]
    fn test_start_of_day_truncates_time() {
        assert_eq!(start_of(TimeUnit::Day, at(2024, 6, 12, 17)), day(2024, 6, 12));
    }

    #[test]
    fn test_start_of_week_is_sunday() {
        // Wed Jun 12 2024 → Sun Jun 9
        let start = start_of(TimeUnit::Week, at(2024, 6, 12, 9));
        assert_eq!(start, day(2024, 6, 9));
        assert_eq!(start.weekday(), Weekday::Sun);
    }

    #[test]
    fn test_start_of_week_on_sunday_is_identity() {
        assert_eq!(start_of(TimeUnit::Week, day(2024, 6, 9)), day(2024, 6, 9));
    }

    #[test]
    fn test_start_of_month() {
        assert_eq!(start_of(TimeUnit::Month, at(2024, 2, 29, 23)), day(2024, 2, 1));
    }

    #[test]
    fn test_start_of_quarter() {
        assert_eq!(start_of(TimeUnit::Quarter, day(2024, 3, 31)), day(2024, 1, 1));
        assert_eq!(start_of(TimeUnit::Quarter, day(2024, 4, 1)), day(2024, 4, 1));
        assert_eq!(start_of(TimeUnit::Quarter, day(2024, 8, 15)), day(2024, 7, 1));
        assert_eq!(start_of(TimeUnit::Quarter, day(2024, 12, 31)), day(2024, 10, 1));
    }

    #[test]
    fn test_start_of_year() {
        assert_eq!(start_of(TimeUnit::Year, day(2024, 12, 31)), day(2024, 1, 1));
    }

    // ── add / subtract ──────────────────────────────────────────────────

    #[test]
    fn test_add_days_across_month_end() {
        assert_eq!(add(day(2024, 1, 31), 1, TimeUnit::Day), day(2024, 2, 1));
    }

    #[test]
    fn test_subtract_weeks() {
        assert_eq!(subtract(day(2024, 6, 10), 1, TimeUnit::Week), day(2024, 6, 3));
    }

    #[test]
    fn test_add_month_clamps_to_month_end() {
        assert_eq!(add(day(2024, 1, 31), 1, TimeUnit::Month), day(2024, 2, 29));
        assert_eq!(add(day(2023, 1, 31), 1, TimeUnit::Month), day(2023, 2, 28));
    }

    #[test]
    fn test_subtract_year_from_leap_day() {
        assert_eq!(subtract(day(2024, 2, 29), 1, TimeUnit::Year), day(2023, 2, 28));
    }

    #[test]
    fn test_add_quarter() {
        assert_eq!(add(day(2024, 11, 15), 1, TimeUnit::Quarter), day(2025, 2, 15));
    }

    #[test]
    fn test_add_saturates_instead_of_panicking() {
        assert_eq!(
            add(day(2024, 1, 1), i64::MAX, TimeUnit::Year),
            DateTime::<Utc>::MAX_UTC
        );
        assert_eq!(
            subtract(day(2024, 1, 1), i64::MAX, TimeUnit::Day),
            DateTime::<Utc>::MIN_UTC
        );
    }

    // ── comparisons ─────────────────────────────────────────────────────

    #[test]
    fn test_day_granular_comparisons_ignore_time() {
        assert!(is_same_day(at(2024, 6, 1, 0), at(2024, 6, 1, 23)));
        assert!(!is_before_day(at(2024, 6, 1, 0), at(2024, 6, 1, 23)));
        assert!(is_before_day(at(2024, 6, 1, 23), at(2024, 6, 2, 0)));
    }

    #[test]
    fn test_days_between_spans_leap_day() {
        assert_eq!(days_between(day(2024, 2, 28), day(2024, 3, 1)), 2);
        assert_eq!(days_between(day(2024, 3, 1), day(2024, 2, 28)), -2);
    }

    #[test]
    fn test_end_of_day() {
        let end = end_of_day(at(2024, 1, 10, 5));
        assert_eq!(end, day(2024, 1, 11) - Duration::milliseconds(1));
        assert!(!is_start_of_day(end));
        assert!(is_start_of_day(day(2024, 1, 10)));
    }

    #[test]
    fn test_end_of_day_on_last_representable_day() {
        let max = DateTime::<Utc>::MAX_UTC;
        assert_eq!(end_of_day(max), max);
    }

    // ── whole_weeks ─────────────────────────────────────────────────────

    #[test]
    fn test_whole_weeks_per_unit() {
        assert_eq!(TimeUnit::Day.whole_weeks(1), 0);
        assert_eq!(TimeUnit::Week.whole_weeks(1), 1);
        assert_eq!(TimeUnit::Week.whole_weeks(52), 52);
        assert_eq!(TimeUnit::Month.whole_weeks(1), 4);
        assert_eq!(TimeUnit::Quarter.whole_weeks(1), 13);
        assert_eq!(TimeUnit::Year.whole_weeks(1), 52);
    }
}
