//! Report data types.

use chrono::{DateTime, Utc};
use cyclebook_shared::types::{AccountId, Currency, Money};
use serde::{Deserialize, Serialize};

use crate::period::{ClosingDay, Period, PeriodKey};
use crate::reconciliation::ReconciliationResult;

/// Statement report for one account and one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReport {
    /// Account ID.
    pub account_id: AccountId,
    /// Account name.
    pub account_name: String,
    /// Account currency.
    pub currency: Currency,
    /// Closing day the period was computed with.
    pub closing_day: ClosingDay,
    /// Period covered.
    pub period: Period,
    /// Period key.
    pub key: PeriodKey,
    /// Snapshot instant the report was computed from.
    pub as_of: DateTime<Utc>,
    /// Balance carried into the period.
    pub opening_balance: Money,
    /// Signed sum of the period's flow.
    pub net_flow: Money,
    /// Balance carried out of the period.
    pub closing_balance: Money,
    /// Forecast-vs-actual per category.
    pub reconciliation: ReconciliationResult,
}
