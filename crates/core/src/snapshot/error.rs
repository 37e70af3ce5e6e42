//! Snapshot error types.

use cyclebook_shared::types::{AccountId, CategoryId, CreditInstrumentId, EntryId};
use thiserror::Error;

use crate::period::PeriodError;

/// Referential errors found while validating a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// Account not present in the snapshot.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Credit instrument attached to an unknown account.
    #[error("Credit instrument {instrument_id} references unknown account {account_id}")]
    InstrumentAccountUnknown {
        /// Instrument ID.
        instrument_id: CreditInstrumentId,
        /// Referenced account.
        account_id: AccountId,
    },

    /// Category attached to an unknown account.
    #[error("Category {category_id} references unknown account {account_id}")]
    CategoryAccountUnknown {
        /// Category ID.
        category_id: CategoryId,
        /// Referenced account.
        account_id: AccountId,
    },

    /// Entry posted to an unknown account.
    #[error("Entry {entry_id} references unknown account {account_id}")]
    EntryAccountUnknown {
        /// Entry ID.
        entry_id: EntryId,
        /// Referenced account.
        account_id: AccountId,
    },

    /// Entry charged to an unknown credit instrument.
    #[error("Entry {entry_id} references unknown credit instrument {instrument_id}")]
    EntryInstrumentUnknown {
        /// Entry ID.
        entry_id: EntryId,
        /// Referenced instrument.
        instrument_id: CreditInstrumentId,
    },

    /// Entry charged to an instrument owned by another account.
    #[error("Entry {entry_id} uses credit instrument {instrument_id} of another account")]
    InstrumentAccountMismatch {
        /// Entry ID.
        entry_id: EntryId,
        /// Referenced instrument.
        instrument_id: CreditInstrumentId,
    },

    /// Billing date could not be resolved.
    #[error(transparent)]
    Period(#[from] PeriodError),
}
