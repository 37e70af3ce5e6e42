//! Ledger entry domain types.

use chrono::NaiveDate;
use cyclebook_shared::types::{AccountId, CategoryId, CreditInstrumentId, EntryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reserved description of an entry that carries an already rolled-up
/// starting balance. Such entries are kept but never counted as flow.
pub const OPENING_BALANCE_MARKER: &str = "Opening Balance";

/// A single ledger entry.
///
/// Income carries a positive amount, expense a negative one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier for this entry.
    pub id: EntryId,
    /// The account this entry belongs to.
    pub account_id: AccountId,
    /// Category of the entry. May point at a deleted category.
    pub category_id: CategoryId,
    /// Real-world date of the entry (purchase date for card charges).
    pub date: NaiveDate,
    /// Signed amount.
    pub amount: Decimal,
    /// Credit instrument the entry was charged to, if any.
    #[serde(default)]
    pub credit_instrument_id: Option<CreditInstrumentId>,
    /// Statement date the charge is attributed to.
    #[serde(default)]
    pub billing_date: Option<NaiveDate>,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

impl LedgerEntry {
    /// Creates a plain (non-card) entry.
    #[must_use]
    pub fn new(
        account_id: AccountId,
        category_id: CategoryId,
        date: NaiveDate,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            account_id,
            category_id,
            date,
            amount,
            credit_instrument_id: None,
            billing_date: None,
            description: description.into(),
        }
    }

    /// Marks the entry as charged to a credit instrument.
    #[must_use]
    pub fn charged_to(
        mut self,
        instrument_id: CreditInstrumentId,
        billing_date: Option<NaiveDate>,
    ) -> Self {
        self.credit_instrument_id = Some(instrument_id);
        self.billing_date = billing_date;
        self
    }

    /// Returns true for the sentinel opening-balance entry.
    #[must_use]
    pub fn is_opening_balance(&self) -> bool {
        self.description == OPENING_BALANCE_MARKER
    }

    /// Returns true if the entry was charged to a credit instrument.
    #[must_use]
    pub fn is_credit_charge(&self) -> bool {
        self.credit_instrument_id.is_some()
    }
}
