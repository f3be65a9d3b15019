//! Error types for period-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid range: end ({end}) is before start ({start})")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid period type: {0}")]
    InvalidPeriodType(String),

    #[error("Invalid range string: {0}")]
    InvalidRangeString(String),

    #[error("Invalid granularity: {0}")]
    InvalidGranularity(String),
}

pub type Result<T> = std::result::Result<T, PeriodError>;
