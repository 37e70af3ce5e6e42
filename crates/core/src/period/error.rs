//! Period error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while building statement periods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Closing day outside 1..=31. Raised when an account or instrument is
    /// loaded, never per transaction.
    #[error("Invalid closing day {0}: expected a value between 1 and 31")]
    InvalidClosingDay(u32),

    /// The window around this date falls outside the supported calendar.
    #[error("Date out of supported range: {0}")]
    DateOutOfRange(NaiveDate),

    /// A period key string could not be parsed.
    #[error("Invalid period key: {0}")]
    InvalidPeriodKey(String),

    /// Start date is after end date.
    #[error("Invalid period: start {start} is after end {end}")]
    InvalidRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}
