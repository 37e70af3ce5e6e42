//! Report error types.

use thiserror::Error;

use crate::period::PeriodError;
use crate::snapshot::SnapshotError;

/// Errors that can occur during report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Snapshot lookup failed.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Period could not be computed.
    #[error(transparent)]
    Period(#[from] PeriodError),

    /// More consecutive periods requested than allowed.
    #[error("Requested {requested} periods, at most {max} allowed")]
    TooManyPeriods {
        /// Requested count.
        requested: u32,
        /// Upper bound.
        max: u32,
    },
}
