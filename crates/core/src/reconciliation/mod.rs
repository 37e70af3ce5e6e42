//! Forecast-vs-actual reconciliation per category.

pub mod service;
pub mod types;


pub use service::ReconciliationService;
pub use types::{
    CategoryBucket, CategoryGroup, CategoryReconciliation, FlowTotals, ReconciliationResult,
    ReconciliationTotals, UNCATEGORIZED_LABEL,
};
