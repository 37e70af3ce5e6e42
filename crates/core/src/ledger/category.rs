//! Categories and flow direction.

use cyclebook_shared::types::{AccountId, CategoryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of money flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowType {
    /// Money coming in (positive amounts).
    Income,
    /// Money going out (negative amounts).
    Expense,
}

impl FlowType {
    /// Infers the direction from a signed amount. Zero counts as income.
    #[must_use]
    pub fn from_amount(amount: Decimal) -> Self {
        if amount.is_sign_negative() && !amount.is_zero() {
            Self::Expense
        } else {
            Self::Income
        }
    }

    /// Converts a summed signed amount into the reported figure: expense
    /// magnitudes are reported as positive numbers.
    #[must_use]
    pub fn reported(self, signed_total: Decimal) -> Decimal {
        match self {
            Self::Income => signed_total,
            Self::Expense => signed_total.abs(),
        }
    }
}

/// A category, optionally nested one level under a parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Owning account.
    pub account_id: AccountId,
    /// Display name.
    pub name: String,
    /// Flow direction.
    pub flow_type: FlowType,
    /// Parent category, if nested.
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}
