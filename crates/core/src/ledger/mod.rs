//! Ledger data model.
//!
//! These are the records the persistence layer hands to the engine:
//! - Accounts and the credit instruments attached to them
//! - Categories with their flow direction
//! - Ledger entries (signed amounts, optional billing date)
//! - Forecast entries keyed by period end

pub mod account;
pub mod category;
pub mod entry;
pub mod forecast;

pub use account::{Account, CreditInstrument};
pub use category::{Category, FlowType};
pub use entry::{LedgerEntry, OPENING_BALANCE_MARKER};
pub use forecast::ForecastEntry;
