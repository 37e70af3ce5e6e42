//! Mapping of engine errors to application errors.
//!
//! Each mapping picks the `AppError` variant that carries the right exit code
//! and stable error code.

use cyclebook_core::installment::InstallmentError;
use cyclebook_core::period::PeriodError;
use cyclebook_core::report::ReportError;
use cyclebook_core::snapshot::SnapshotError;
use cyclebook_shared::AppError;

/// Maps period errors.
pub fn map_period_error(e: &PeriodError) -> AppError {
    match e {
        PeriodError::InvalidClosingDay(_) => AppError::Configuration(e.to_string()),
        PeriodError::InvalidPeriodKey(_) | PeriodError::InvalidRange { .. } => {
            AppError::Validation(e.to_string())
        }
        PeriodError::DateOutOfRange(_) => AppError::InvariantViolation(e.to_string()),
    }
}

/// Maps installment errors.
pub fn map_installment_error(e: &InstallmentError) -> AppError {
    match e {
        InstallmentError::Period(inner) => map_period_error(inner),
        InstallmentError::InvalidCount { .. }
        | InstallmentError::NonPositiveTotal(_)
        | InstallmentError::AmountTooSmall { .. }
        | InstallmentError::AmountOutOfRange(_) => AppError::Validation(e.to_string()),
    }
}

/// Maps snapshot errors.
pub fn map_snapshot_error(e: &SnapshotError) -> AppError {
    match e {
        SnapshotError::AccountNotFound(_) => AppError::NotFound(e.to_string()),
        SnapshotError::Period(inner) => map_period_error(inner),
        SnapshotError::InstrumentAccountUnknown { .. }
        | SnapshotError::CategoryAccountUnknown { .. }
        | SnapshotError::EntryAccountUnknown { .. }
        | SnapshotError::EntryInstrumentUnknown { .. }
        | SnapshotError::InstrumentAccountMismatch { .. } => AppError::Validation(e.to_string()),
    }
}

/// Maps report errors.
pub fn map_report_error(e: &ReportError) -> AppError {
    match e {
        ReportError::Snapshot(inner) => map_snapshot_error(inner),
        ReportError::Period(inner) => map_period_error(inner),
        ReportError::TooManyPeriods { .. } => AppError::Validation(e.to_string()),
    }
}
