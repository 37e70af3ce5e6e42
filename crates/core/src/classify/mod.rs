//! Billing date classification.
//!
//! Decides which date of an entry governs its period membership. Card
//! charges carrying a billing date are classified by that date, everything
//! else by the entry date.

pub mod classifier;

pub use classifier::{
    classification_date, classify, counts_toward_flow, flow_entries_in, is_in_period, period_of,
    resolve_billing_date,
};
