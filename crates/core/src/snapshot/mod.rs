//! Ledger snapshots.
//!
//! A snapshot is one consistent `as_of` view of everything the engine reads.
//! Reports are always computed from a single snapshot.

pub mod document;
pub mod error;
pub mod model;

pub use document::{AccountRecord, CreditInstrumentRecord, SnapshotDocument};
pub use error::SnapshotError;
pub use model::{AccountView, LedgerSnapshot};
