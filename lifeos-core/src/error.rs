//! Error types for lifeos-core
//!
//! The streak algorithms are total over their domain; these variants cover
//! the defensive boundary checks only (unknown granularity strings and
//! timestamps chrono cannot represent).

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for the lifeos-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Granularity string not one of day/week/month
    #[error("unknown granularity: {0}")]
    InvalidGranularity(String),

    /// Epoch-millisecond timestamp outside the representable date range
    #[error("timestamp out of range: {0}ms")]
    TimestampOutOfRange(i64),

    /// Period arithmetic walked past the representable date range
    #[error("period arithmetic overflowed past {0}")]
    PeriodOverflow(NaiveDate),
}

/// Result type alias for lifeos-core
pub type Result<T> = std::result::Result<T, Error>;
