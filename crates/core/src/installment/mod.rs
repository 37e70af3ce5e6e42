//! Credit instrument installment splitting.
//!
//! A purchase lands in the instrument cycle containing its date and is split
//! into N penny-exact installments over consecutive cycles.

pub mod error;
pub mod splitter;

#[cfg(test)]
mod splitter_props;

pub use error::InstallmentError;
pub use splitter::{
    EntryTemplate, Installment, InstallmentPlan, InstallmentRules, InstallmentSplitter,
    allocate_minor_units, split_installments,
};
