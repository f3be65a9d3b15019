//! UTC day normalization.
//!
//! Reports are keyed by UTC calendar days, but "today" is the day the
//! observer sees on their own clock. Late in the evening west of Greenwich
//! the UTC calendar has already rolled over, and reading the instant as UTC
//! would put "today" one day ahead. These helpers fold that back so every
//! caller agrees on the same day. The correction only ever moves backward:
//! east of Greenwich the local day can start before the UTC day does, and
//! that partial UTC day must not count as "today".

use chrono::{DateTime, FixedOffset, Local, Utc};

use crate::calendar::midnight;

/// Return the UTC-midnight value of "today" for an observer at
/// `local_offset` at `value`.
///
/// When the UTC day is one ahead of the local day, the result is the
/// previous UTC day; otherwise it is `value`'s UTC day truncated to
/// midnight. The result is never later than the UTC day.
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, TimeZone, Utc};
/// use period_engine::normalize::normalize_utc_day;
///
/// // 02:00 UTC on Jun 11 is still Jun 10 in New York (UTC-4).
/// let instant = Utc.with_ymd_and_hms(2024, 6, 11, 2, 0, 0).unwrap();
/// let new_york = FixedOffset::west_opt(4 * 3600).unwrap();
/// let day = normalize_utc_day(instant, new_york);
/// assert_eq!(day, Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap());
/// ```
pub fn normalize_utc_day(value: DateTime<Utc>, local_offset: FixedOffset) -> DateTime<Utc> {
    let local_day = value.with_timezone(&local_offset).date_naive();
    midnight(local_day.min(value.date_naive()))
}

/// "Today" for an observer at `local_offset` when the clock reads `now`.
///
/// Pure form of [`today`]; prefer it anywhere the anchor must be
/// reproducible (tests, replayed reports).
pub fn today_at(now: DateTime<Utc>, local_offset: FixedOffset) -> DateTime<Utc> {
    normalize_utc_day(now, local_offset)
}

/// "Today" according to the system clock and the process's local offset,
/// as a UTC-midnight value.
pub fn today() -> DateTime<Utc> {
    let offset = *Local::now().offset();
    today_at(Utc::now(), offset)
}
