//! The reporting-period registry.
//!
//! Each [`PeriodConfig`] pairs a resolver that turns a reference date into
//! the most recent complete period with the offset that finds the
//! comparable prior period. The table is a `static` of plain function
//! pointers: nothing to construct, nothing to tear down, safe to share
//! across threads.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{add, start_of, subtract, TimeUnit};
use crate::comparison;
use crate::error::{PeriodError, Result};
use crate::normalize::today;
use crate::range::DateRange;

/// Months from January 1 to the first day of the fiscal year (April 1).
const FISCAL_YEAR_START_OFFSET_MONTHS: i64 = 3;

/// Weeks covered by [`PeriodType::Last52Weeks`].
const TRAILING_WEEKS: i64 = 52;

/// A named reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    Week,
    Month,
    Quarter,
    Year,
    FiscalYear,
    #[serde(rename = "last_52_weeks")]
    Last52Weeks,
    YearToDate,
    /// Two explicit ranges; see [`crate::custom`].
    Custom,
}

impl PeriodType {
    pub const ALL: [PeriodType; 8] = [
        PeriodType::Week,
        PeriodType::Month,
        PeriodType::Quarter,
        PeriodType::Year,
        PeriodType::FiscalYear,
        PeriodType::Last52Weeks,
        PeriodType::YearToDate,
        PeriodType::Custom,
    ];

    /// Wire name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            PeriodType::Week => "week",
            PeriodType::Month => "month",
            PeriodType::Quarter => "quarter",
            PeriodType::Year => "year",
            PeriodType::FiscalYear => "fiscal_year",
            PeriodType::Last52Weeks => "last_52_weeks",
            PeriodType::YearToDate => "year_to_date",
            PeriodType::Custom => "custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PeriodType::Week => "Last Week",
            PeriodType::Month => "Last Month",
            PeriodType::Quarter => "Last Quarter",
            PeriodType::Year => "Last Year",
            PeriodType::FiscalYear => "Last Fiscal Year",
            PeriodType::Last52Weeks => "Last 52 Weeks",
            PeriodType::YearToDate => "Year to Date",
            PeriodType::Custom => "Custom",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        PeriodType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| PeriodError::InvalidPeriodType(format!("unknown period '{}'", s.trim())))
    }
}

/// A registry entry: how to resolve one period type.
#[derive(Debug, Clone, Copy)]
pub struct PeriodConfig {
    pub period_type: PeriodType,
    pub label: &'static str,
    resolve: fn(DateTime<Utc>) -> DateRange,
    comparison_weeks: fn(DateTime<Utc>) -> i64,
}

impl PeriodConfig {
    /// Most recent complete period before `from` (default: [`today`]).
    pub fn get_date_range(&self, from: Option<DateTime<Utc>>) -> DateRange {
        (self.resolve)(from.unwrap_or_else(today))
    }

    /// The same-weekday date one period before `from` (default: [`today`]).
    pub fn get_comparison_date(&self, from: Option<DateTime<Utc>>) -> DateTime<Utc> {
        let from = from.unwrap_or_else(today);
        comparison::shift_back(from, (self.comparison_weeks)(from))
    }

    /// The prior comparable range for `range`, with the same span and
    /// weekday alignment.
    pub fn comparison_range(&self, range: &DateRange) -> DateRange {
        comparison::shift_range(range, self.comparison_weeks)
    }
}

/// Every registry-resolvable period, in display order.
pub static PERIODS: [PeriodConfig; 7] = [
    PeriodConfig {
        period_type: PeriodType::Week,
        label: "Last Week",
        resolve: week_range,
        comparison_weeks: one_week,
    },
    PeriodConfig {
        period_type: PeriodType::Month,
        label: "Last Month",
        resolve: month_range,
        comparison_weeks: one_month,
    },
    PeriodConfig {
        period_type: PeriodType::Quarter,
        label: "Last Quarter",
        resolve: quarter_range,
        comparison_weeks: comparison::quarter_offset,
    },
    PeriodConfig {
        period_type: PeriodType::Year,
        label: "Last Year",
        resolve: year_range,
        comparison_weeks: one_year,
    },
    PeriodConfig {
        period_type: PeriodType::FiscalYear,
        label: "Last Fiscal Year",
        resolve: fiscal_year_range,
        comparison_weeks: one_year,
    },
    PeriodConfig {
        period_type: PeriodType::Last52Weeks,
        label: "Last 52 Weeks",
        resolve: last_52_weeks_range,
        comparison_weeks: trailing_weeks,
    },
    PeriodConfig {
        period_type: PeriodType::YearToDate,
        label: "Year to Date",
        resolve: year_to_date_range,
        comparison_weeks: one_year,
    },
];

/// Look up the registry entry for `period_type`.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidPeriodType`] for [`PeriodType::Custom`],
/// which has no resolver; build it with
/// [`create_custom_date_range_period`](crate::custom::create_custom_date_range_period).
pub fn period_config(period_type: PeriodType) -> Result<&'static PeriodConfig> {
    PERIODS
        .iter()
        .find(|config| config.period_type == period_type)
        .ok_or_else(|| {
            PeriodError::InvalidPeriodType(format!(
                "'{period_type}' cannot be resolved from the registry"
            ))
        })
}

// ── Resolvers ───────────────────────────────────────────────────────────────

/// The complete `unit` immediately preceding the one containing `from`.
fn unit_range(unit: TimeUnit, from: DateTime<Utc>) -> DateRange {
    let end = subtract(start_of(unit, from), 1, TimeUnit::Day);
    DateRange::new(start_of(unit, end), end)
}

fn week_range(from: DateTime<Utc>) -> DateRange {
    unit_range(TimeUnit::Week, from)
}

fn month_range(from: DateTime<Utc>) -> DateRange {
    unit_range(TimeUnit::Month, from)
}

fn quarter_range(from: DateTime<Utc>) -> DateRange {
    unit_range(TimeUnit::Quarter, from)
}

fn year_range(from: DateTime<Utc>) -> DateRange {
    unit_range(TimeUnit::Year, from)
}

/// April 1 – March 31, the latest fiscal year that ended before `from`.
fn fiscal_year_range(from: DateTime<Utc>) -> DateRange {
    let day = start_of(TimeUnit::Day, from);
    let fiscal_start = add(
        start_of(TimeUnit::Year, day),
        FISCAL_YEAR_START_OFFSET_MONTHS,
        TimeUnit::Month,
    );
    let mut end = subtract(fiscal_start, 1, TimeUnit::Day);
    if end >= day {
        end = subtract(end, 1, TimeUnit::Year);
    }
    let start = add(subtract(end, 1, TimeUnit::Year), 1, TimeUnit::Day);
    DateRange::new(start, end)
}

/// Sunday through Saturday, 52 weeks ending with the last complete week.
///
/// `end` is the Saturday itself, so the span is `52 * 7 - 1` days.
fn last_52_weeks_range(from: DateTime<Utc>) -> DateRange {
    let end = subtract(start_of(TimeUnit::Week, from), 1, TimeUnit::Day);
    let start = subtract(start_of(TimeUnit::Week, end), TRAILING_WEEKS - 1, TimeUnit::Week);
    DateRange::new(start, end)
}

fn year_to_date_range(from: DateTime<Utc>) -> DateRange {
    let end = subtract(start_of(TimeUnit::Day, from), 1, TimeUnit::Day);
    DateRange::new(start_of(TimeUnit::Year, end), end)
}

// ── Comparison offsets ──────────────────────────────────────────────────────

fn one_week(_: DateTime<Utc>) -> i64 {
    TimeUnit::Week.whole_weeks(1)
}

fn one_month(_: DateTime<Utc>) -> i64 {
    TimeUnit::Month.whole_weeks(1)
}

fn one_year(_: DateTime<Utc>) -> i64 {
    TimeUnit::Year.whole_weeks(1)
}

fn trailing_weeks(_: DateTime<Utc>) -> i64 {
    TimeUnit::Week.whole_weeks(TRAILING_WEEKS)
}

// ── Tests ───────────────────────────────────────────────────────────────────
