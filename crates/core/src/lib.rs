//! Core business logic for Cyclebook.
//!
//! This crate contains pure statement-cycle accounting logic with ZERO I/O
//! dependencies. Callers hand it a ledger snapshot and get periods, balances
//! and reconciliations back; nothing is cached between calls.
//!
//! # Modules
//!
//! - `period` - Statement period windows anchored to a closing day
//! - `classify` - Entry-date vs billing-date classification
//! - `balance` - Carry-forward opening balances
//! - `reconciliation` - Forecast-vs-actual per category
//! - `installment` - Penny-exact credit installment splitting
//! - `snapshot` - Consistent ledger views and load-time normalization
//! - `report` - Period reports combining all of the above

pub mod balance;
pub mod classify;
pub mod installment;
pub mod ledger;
pub mod period;
pub mod reconciliation;
pub mod report;
pub mod snapshot;

pub use balance::opening_balance;
pub use classify::classify;
pub use installment::split_installments;
pub use period::compute_period;
pub use reconciliation::ReconciliationService;
pub use report::ReportService;
