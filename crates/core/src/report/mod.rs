//! Period reports.
//!
//! A period report combines, for one account and one statement period:
//! - the carried (opening) balance
//! - the period's net flow and closing balance
//! - the forecast-vs-actual reconciliation

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use types::PeriodReport;
