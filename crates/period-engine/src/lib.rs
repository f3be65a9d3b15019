//! # period-engine
//!
//! Deterministic reporting-period computation.
//!
//! Every report is computed over a "current" date range and an equivalent
//! "comparison" range so that period-over-period change can be reported.
//! This crate resolves both, keeping day counts consistent and comparison
//! boundaries on the same weekday as the current ones, across months of
//! different lengths, quarters, fiscal years and leap years. Everything
//! is a pure function over immutable values in a single UTC calendar.
//!
//! ## Modules
//!
//! - [`normalize`] — "today" as a UTC-midnight value, corrected for the caller's local offset
//! - [`period`] — Period types and the static registry of resolvers
//! - [`comparison`] — Weekday-preserving comparison offsets (generic and quarter)
//! - [`resolve`] — `get_date_range` with comparison and representation options
//! - [`expand`] — Day, month and granularity splitting of a range
//! - [`custom`] — Custom periods from two explicit range strings
//! - [`range`] — `DateRange` and the `YYYY-MM-DD/YYYY-MM-DD` wire format
//! - [`calendar`] — Unit arithmetic and truncation over UTC instants
//! - [`error`] — Error types

pub mod calendar;
pub mod comparison;
pub mod custom;
pub mod error;
pub mod expand;
pub mod normalize;
pub mod period;
pub mod range;
pub mod resolve;

pub use calendar::TimeUnit;
pub use custom::{create_custom_date_range_period, CustomPeriod};
pub use error::PeriodError;
pub use expand::{
    date_range_to_granularity, date_range_to_granularity_formatted, dates_from_date_range,
    dates_from_date_range_formatted, months_from_date_range, Granularity,
};
pub use normalize::{normalize_utc_day, today, today_at};
pub use period::{period_config, PeriodConfig, PeriodType, PERIODS};
pub use range::{date_range_split, date_range_to_string, parse_date_range_string, DateRange};
pub use resolve::{comparison_range, get_date_range, Boundaries, RangeOptions, ResolvedRange};
