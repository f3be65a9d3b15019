//! Custom periods built from two explicit range strings.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::expand::dates_from_date_range;
use crate::period::PeriodType;
use crate::range::{parse_date_range_string, DateRange, DATE_FORMAT};

/// A period outside the registry: a current range, a comparison range, and
/// the day-by-day correspondence between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPeriod {
    #[serde(rename = "type")]
    pub period_type: PeriodType,
    pub label: String,
    pub date_range: DateRange<String>,
    pub comparison_date_range: DateRange<String>,
    /// Comparison day → current day, both as ISO-8601 UTC timestamps,
    /// ordered by comparison day.
    pub dates: BTreeMap<String, String>,
}

impl CustomPeriod {
    /// The current-range day paired with `comparison_day` (an ISO-8601
    /// timestamp as produced by [`iso_key`]).
    pub fn current_day_for(&self, comparison_day: &str) -> Option<&str> {
        self.dates.get(comparison_day).map(String::as_str)
    }
}

/// Build a [`CustomPeriod`] from two `YYYY-MM-DD/YYYY-MM-DD` strings.
///
/// Both ranges are expanded inclusively and paired positionally: the i-th
/// comparison day maps to the i-th current day. When the ranges differ in
/// length the pairing stops at the shorter one; callers overlaying the two
/// ranges day by day must supply ranges of equal length.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidRangeString`](crate::PeriodError::InvalidRangeString)
/// if either string is malformed.
///
/// # Examples
///
/// ```
/// use period_engine::custom::create_custom_date_range_period;
///
/// let period =
///     create_custom_date_range_period("2024-06-01/2024-06-07", "2023-06-03/2023-06-09").unwrap();
/// assert_eq!(period.dates.len(), 7);
/// assert_eq!(
///     period.current_day_for("2023-06-03T00:00:00.000Z"),
///     Some("2024-06-01T00:00:00.000Z")
/// );
/// ```
pub fn create_custom_date_range_period(
    range: &str,
    comparison_range: &str,
) -> Result<CustomPeriod> {
    let current = parse_date_range_string(range)?;
    let comparison = parse_date_range_string(comparison_range)?;

    let current_days = dates_from_date_range(&current, true)?;
    let comparison_days = dates_from_date_range(&comparison, true)?;
    if current_days.len() != comparison_days.len() {
        warn!(
            current = %current,
            comparison = %comparison,
            current_days = current_days.len(),
            comparison_days = comparison_days.len(),
            "custom ranges differ in length; day pairing truncated to the shorter range"
        );
    }

    let dates = comparison_days
        .iter()
        .zip(&current_days)
        .map(|(compared, current)| (iso_key(*compared), iso_key(*current)))
        .collect();

    Ok(CustomPeriod {
        period_type: PeriodType::Custom,
        label: PeriodType::Custom.label().to_string(),
        date_range: current.format(DATE_FORMAT),
        comparison_date_range: comparison.format(DATE_FORMAT),
        dates,
    })
}

/// Key format used by [`CustomPeriod::dates`].
pub fn iso_key(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
