//! Installment error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::period::PeriodError;

/// Errors raised while splitting a purchase into installments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstallmentError {
    /// Installment count outside the accepted range.
    #[error("Invalid installment count {count}: expected {min} to {max}")]
    InvalidCount {
        /// Requested count.
        count: u32,
        /// Smallest accepted count.
        min: u32,
        /// Largest accepted count.
        max: u32,
    },

    /// Total must be positive; the sign is applied when entries are created.
    #[error("Installment total must be positive, got {0}")]
    NonPositiveTotal(Decimal),

    /// Total too small to give every installment at least one cent.
    #[error("Total {total} cannot be split into {count} non-zero installments")]
    AmountTooSmall {
        /// Purchase total.
        total: Decimal,
        /// Requested count.
        count: u32,
    },

    /// Total does not fit in integer cents.
    #[error("Installment total out of range: {0}")]
    AmountOutOfRange(Decimal),

    /// Billing cycle could not be computed.
    #[error(transparent)]
    Period(#[from] PeriodError),
}
