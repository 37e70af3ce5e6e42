//! Forecast entries.

use chrono::NaiveDate;
use cyclebook_shared::types::{CategoryId, ForecastId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::period::Period;

/// Planned amount for one category in one period.
///
/// Forecasted amounts are magnitudes: positive for both income and expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Unique identifier.
    pub id: ForecastId,
    /// Forecasted category.
    pub category_id: CategoryId,
    /// Start of the forecast window, as stored.
    pub period_start: NaiveDate,
    /// End of the forecast window, as stored.
    pub period_end: NaiveDate,
    /// Planned amount.
    pub forecasted_amount: Decimal,
}

impl ForecastEntry {
    /// Returns true if this forecast belongs to `period`.
    ///
    /// Matching is by exact equality of the period end, not by overlap.
    #[must_use]
    pub fn matches(&self, period: &Period) -> bool {
        self.period_end == period.end
    }
}
