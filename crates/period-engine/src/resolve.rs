//! Caller-facing period resolution.
//!
//! Report code asks for a period by type and gets back the resolved range,
//! optionally paired with its comparison range.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::period::{period_config, PeriodType};
use crate::range::DateRange;

/// Options for [`get_date_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeOptions {
    /// Return boundaries as UTC instants (`true`, the default) or as
    /// calendar days.
    pub as_date: bool,
    /// Also resolve the comparison range.
    pub with_comparison: bool,
    /// Reference date; defaults to [`today`](crate::normalize::today).
    pub from: Option<DateTime<Utc>>,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            as_date: true,
            with_comparison: false,
            from: None,
        }
    }
}

/// Range boundaries in the representation chosen by
/// [`RangeOptions::as_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Boundaries {
    Instant(DateRange),
    Calendar(DateRange<NaiveDate>),
}

impl Boundaries {
    fn new(range: DateRange, as_date: bool) -> Self {
        if as_date {
            Boundaries::Instant(range)
        } else {
            Boundaries::Calendar(range.to_calendar())
        }
    }

    pub fn as_instant(&self) -> Option<&DateRange> {
        match self {
            Boundaries::Instant(range) => Some(range),
            Boundaries::Calendar(_) => None,
        }
    }

    pub fn as_calendar(&self) -> Option<&DateRange<NaiveDate>> {
        match self {
            Boundaries::Calendar(range) => Some(range),
            Boundaries::Instant(_) => None,
        }
    }
}

/// A resolved period and, if requested, its comparison counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedRange {
    #[serde(rename = "type")]
    pub period_type: PeriodType,
    pub label: &'static str,
    pub range: Boundaries,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Boundaries>,
}

/// Resolve `period_type` to its most recent complete range.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidPeriodType`](crate::PeriodError::InvalidPeriodType)
/// for [`PeriodType::Custom`].
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use period_engine::{get_date_range, PeriodType, RangeOptions};
///
/// let options = RangeOptions {
///     from: Some(Utc.with_ymd_and_hms(2024, 2, 15, 0, 0, 0).unwrap()),
///     ..RangeOptions::default()
/// };
/// let resolved = get_date_range(PeriodType::FiscalYear, &options).unwrap();
/// assert_eq!(resolved.range.as_instant().unwrap().to_string(), "2022-04-01/2023-03-31");
/// ```
pub fn get_date_range(period_type: PeriodType, options: &RangeOptions) -> Result<ResolvedRange> {
    let config = period_config(period_type)?;
    let range = config.get_date_range(options.from);
    let comparison = options
        .with_comparison
        .then(|| config.comparison_range(&range));

    debug!(
        period = %period_type,
        range = %range,
        comparison = ?comparison.map(|c| c.to_string()),
        "resolved period"
    );

    Ok(ResolvedRange {
        period_type,
        label: config.label,
        range: Boundaries::new(range, options.as_date),
        comparison: comparison.map(|c| Boundaries::new(c, options.as_date)),
    })
}

/// The prior comparable range of `range` for `period_type`.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidPeriodType`](crate::PeriodError::InvalidPeriodType)
/// for [`PeriodType::Custom`].
pub fn comparison_range(period_type: PeriodType, range: &DateRange) -> Result<DateRange> {
    Ok(period_config(period_type)?.comparison_range(range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PeriodError;
    use crate::normalize::today;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn from(date: DateTime<Utc>) -> RangeOptions {
        RangeOptions {
            from: Some(date),
            ..RangeOptions::default()
        }
    }

    #[test]
    fn test_default_options() {
        let options = RangeOptions::default();
        assert!(options.as_date);
        assert!(!options.with_comparison);
        assert!(options.from.is_none());
    }

    #[test]
    fn test_resolves_instant_boundaries() {
        let resolved = get_date_range(PeriodType::Month, &from(day(2024, 3, 15))).unwrap();
        assert_eq!(resolved.label, "Last Month");
        assert_eq!(
            resolved.range.as_instant(),
            Some(&DateRange::new(day(2024, 2, 1), day(2024, 2, 29)))
        );
        assert!(resolved.comparison.is_none());
    }

    #[test]
    fn test_calendar_boundaries_when_not_as_date() {
        let options = RangeOptions {
            as_date: false,
            ..from(day(2024, 3, 15))
        };
        let resolved = get_date_range(PeriodType::Month, &options).unwrap();
        let range = resolved.range.as_calendar().unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(resolved.range.as_instant().is_none());
    }

    #[test]
    fn test_with_comparison() {
        let options = RangeOptions {
            with_comparison: true,
            ..from(day(2024, 6, 10))
        };
        let resolved = get_date_range(PeriodType::Week, &options).unwrap();
        let comparison = resolved.comparison.unwrap();
        assert_eq!(
            comparison.as_instant(),
            Some(&DateRange::new(day(2024, 5, 26), day(2024, 6, 1)))
        );
    }

    #[test]
    fn test_custom_fails_fast() {
        let err = get_date_range(PeriodType::Custom, &RangeOptions::default()).unwrap_err();
        assert!(matches!(err, PeriodError::InvalidPeriodType(_)));
        let range = DateRange::new(day(2024, 1, 1), day(2024, 1, 7));
        assert!(comparison_range(PeriodType::Custom, &range).is_err());
    }

    #[test]
    fn test_default_reference_has_no_future_data() {
        let resolved = get_date_range(PeriodType::YearToDate, &RangeOptions::default()).unwrap();
        assert!(resolved.range.as_instant().unwrap().end < today());
    }

    #[test]
    fn test_quarter_comparison_range_for_q3() {
        let range = DateRange::new(day(2024, 7, 1), day(2024, 9, 30));
        let compared = comparison_range(PeriodType::Quarter, &range).unwrap();
        assert_eq!(compared, DateRange::new(day(2024, 3, 25), day(2024, 6, 24)));
    }

    #[test]
    fn test_serialized_shape() {
        let options = RangeOptions {
            as_date: false,
            with_comparison: true,
            from: Some(day(2024, 6, 10)),
        };
        let resolved = get_date_range(PeriodType::Week, &options).unwrap();
        let json = serde_json::to_value(resolved).unwrap();
        assert_eq!(json["type"], "week");
        assert_eq!(json["range"]["start"], "2024-06-02");
        assert_eq!(json["comparison"]["end"], "2024-06-01");
    }
}
