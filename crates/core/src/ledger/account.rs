//! Accounts and credit instruments.

use cyclebook_shared::types::{AccountId, CreditInstrumentId, Currency};
use serde::{Deserialize, Serialize};

use crate::period::ClosingDay;

/// A tracked account.
///
/// The closing day is validated at deserialization, so a misconfigured
/// account cannot be loaded at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Day of month the account's statement period begins.
    pub closing_day: ClosingDay,
    /// Currency of every amount on this account.
    pub currency: Currency,
}

/// A credit instrument (e.g. a card) attached to an account.
///
/// Its closing day is independent of the owning account's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditInstrument {
    /// Unique identifier.
    pub id: CreditInstrumentId,
    /// Owning account.
    pub account_id: AccountId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Day of month the instrument's billing cycle begins.
    pub closing_day: ClosingDay,
}
