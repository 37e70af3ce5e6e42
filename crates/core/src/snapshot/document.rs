//! Serialized snapshot form.
//!
//! Closing days are read as plain integers so an out-of-range value surfaces
//! as `PeriodError::InvalidClosingDay` (a configuration error) rather than as
//! a decoding failure.

use chrono::{DateTime, Utc};
use cyclebook_shared::types::{AccountId, CreditInstrumentId, Currency};
use serde::{Deserialize, Serialize};

use super::error::SnapshotError;
use super::model::LedgerSnapshot;
use crate::ledger::{Account, Category, CreditInstrument, ForecastEntry, LedgerEntry};
use crate::period::ClosingDay;

/// Account as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Unique identifier.
    pub id: AccountId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Unvalidated closing day.
    pub closing_day: u32,
    /// Account currency.
    pub currency: Currency,
}

/// Credit instrument as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditInstrumentRecord {
    /// Unique identifier.
    pub id: CreditInstrumentId,
    /// Owning account.
    pub account_id: AccountId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Unvalidated closing day.
    pub closing_day: u32,
}

/// Snapshot as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    /// Instant the snapshot was taken.
    pub as_of: DateTime<Utc>,
    /// Tracked accounts.
    #[serde(default)]
    pub accounts: Vec<AccountRecord>,
    /// Credit instruments.
    #[serde(default)]
    pub credit_instruments: Vec<CreditInstrumentRecord>,
    /// Categories of every account.
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Ledger entries of every account.
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
    /// Forecast entries.
    #[serde(default)]
    pub forecasts: Vec<ForecastEntry>,
}

impl TryFrom<AccountRecord> for Account {
    type Error = SnapshotError;

    fn try_from(record: AccountRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            name: record.name,
            closing_day: ClosingDay::new(record.closing_day)?,
            currency: record.currency,
        })
    }
}

impl TryFrom<CreditInstrumentRecord> for CreditInstrument {
    type Error = SnapshotError;

    fn try_from(record: CreditInstrumentRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            account_id: record.account_id,
            name: record.name,
            closing_day: ClosingDay::new(record.closing_day)?,
        })
    }
}

impl TryFrom<SnapshotDocument> for LedgerSnapshot {
    type Error = SnapshotError;

    /// Validates closing days. Referential checks and billing-date repair
    /// are left to [`LedgerSnapshot::normalize`].
    fn try_from(document: SnapshotDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            as_of: document.as_of,
            accounts: document
                .accounts
                .into_iter()
                .map(Account::try_from)
                .collect::<Result<_, _>>()?,
            credit_instruments: document
                .credit_instruments
                .into_iter()
                .map(CreditInstrument::try_from)
                .collect::<Result<_, _>>()?,
            categories: document.categories,
            entries: document.entries,
            forecasts: document.forecasts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::PeriodError;

    fn document(account_day: u32, instrument_day: u32) -> String {
        let account_id = AccountId::new();
        format!(
            r#"{{
                "as_of": "2024-04-01T12:00:00Z",
                "accounts": [
                    {{"id": "{account_id}", "closing_day": {account_day}, "currency": "BRL"}}
                ],
                "credit_instruments": [
                    {{"id": "{}", "account_id": "{account_id}", "closing_day": {instrument_day}}}
                ]
            }}"#,
            CreditInstrumentId::new()
        )
    }

    #[test]
    fn test_valid_document_converts() {
        let parsed: SnapshotDocument = serde_json::from_str(&document(10, 31)).unwrap();
        let snapshot = LedgerSnapshot::try_from(parsed).unwrap();
        assert_eq!(snapshot.accounts[0].closing_day.get(), 10);
        assert_eq!(snapshot.credit_instruments[0].closing_day.get(), 31);
    }

    #[test]
    fn test_out_of_range_account_closing_day_is_period_error() {
        let parsed: SnapshotDocument = serde_json::from_str(&document(32, 10)).unwrap();
        assert_eq!(
            LedgerSnapshot::try_from(parsed),
            Err(SnapshotError::Period(PeriodError::InvalidClosingDay(32)))
        );
    }

    #[test]
    fn test_zero_instrument_closing_day_is_period_error() {
        let parsed: SnapshotDocument = serde_json::from_str(&document(10, 0)).unwrap();
        assert_eq!(
            LedgerSnapshot::try_from(parsed),
            Err(SnapshotError::Period(PeriodError::InvalidClosingDay(0)))
        );
    }
}
