//! Snapshot model, validation and per-account views.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use cyclebook_shared::types::{AccountId, CategoryId, CreditInstrumentId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::SnapshotError;
use crate::classify::resolve_billing_date;
use crate::ledger::{Account, Category, CreditInstrument, ForecastEntry, LedgerEntry};

/// Everything the engine reads, as of one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Instant the snapshot was taken.
    pub as_of: DateTime<Utc>,
    /// Tracked accounts.
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// Credit instruments.
    #[serde(default)]
    pub credit_instruments: Vec<CreditInstrument>,
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

/// The slice of a snapshot belonging to one account.
#[derive(Debug, Clone)]
pub struct AccountView<'a> {
    /// The account.
    pub account: &'a Account,
    /// Entries posted to the account.
    pub entries: Vec<LedgerEntry>,
    /// Categories owned by the account.
    pub categories: Vec<Category>,
    /// Forecasts for the account's categories.
    pub forecasts: Vec<ForecastEntry>,
}

impl LedgerSnapshot {
    /// Creates an empty snapshot taken at `as_of`.
    #[must_use]
    pub fn empty(as_of: DateTime<Utc>) -> Self {
        Self {
            as_of,
            accounts: vec![],
            credit_instruments: vec![],
            categories: vec![],
            entries: vec![],
            forecasts: vec![],
        }
    }

    /// Looks up an account.
    #[must_use]
    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    /// Looks up a credit instrument.
    #[must_use]
    pub fn instrument(&self, id: CreditInstrumentId) -> Option<&CreditInstrument> {
        self.credit_instruments
            .iter()
            .find(|instrument| instrument.id == id)
    }

    /// Checks that every record points at an account (and instrument) of
    /// this snapshot.
    ///
    /// Entries pointing at unknown categories are allowed; reconciliation
    /// routes them to the uncategorized bucket.
    ///
    /// # Errors
    ///
    /// Returns the first referential error found.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let accounts: HashSet<AccountId> = self.accounts.iter().map(|a| a.id).collect();

        for instrument in &self.credit_instruments {
            if !accounts.contains(&instrument.account_id) {
                return Err(SnapshotError::InstrumentAccountUnknown {
                    instrument_id: instrument.id,
                    account_id: instrument.account_id,
                });
            }
        }

        for category in &self.categories {
            if !accounts.contains(&category.account_id) {
                return Err(SnapshotError::CategoryAccountUnknown {
                    category_id: category.id,
                    account_id: category.account_id,
                });
            }
        }

        let instruments: HashMap<CreditInstrumentId, &CreditInstrument> = self
            .credit_instruments
            .iter()
            .map(|instrument| (instrument.id, instrument))
            .collect();

        for entry in &self.entries {
            if !accounts.contains(&entry.account_id) {
                return Err(SnapshotError::EntryAccountUnknown {
                    entry_id: entry.id,
                    account_id: entry.account_id,
                });
            }
            if let Some(instrument_id) = entry.credit_instrument_id {
                let instrument = instruments.get(&instrument_id).ok_or(
                    SnapshotError::EntryInstrumentUnknown {
                        entry_id: entry.id,
                        instrument_id,
                    },
                )?;
                if instrument.account_id != entry.account_id {
                    return Err(SnapshotError::InstrumentAccountMismatch {
                        entry_id: entry.id,
                        instrument_id,
                    });
                }
            }
        }

        Ok(())
    }

    /// Validates the snapshot and fills missing billing dates on credit
    /// instrument charges with the statement date of the purchase cycle.
    ///
    /// Returns the number of repaired entries.
    ///
    /// # Errors
    ///
    /// Returns a `SnapshotError` if validation fails or a billing date
    /// cannot be resolved.
    pub fn normalize(&mut self) -> Result<usize, SnapshotError> {
        self.validate()?;

        let closing_days: HashMap<CreditInstrumentId, _> = self
            .credit_instruments
            .iter()
            .map(|instrument| (instrument.id, instrument.closing_day))
            .collect();

        let mut repaired = 0usize;
        for entry in &mut self.entries {
            let (Some(instrument_id), None) = (entry.credit_instrument_id, entry.billing_date)
            else {
                continue;
            };
            let Some(&closing_day) = closing_days.get(&instrument_id) else {
                continue;
            };
            let billing_date = resolve_billing_date(entry.date, closing_day)?;
            warn!(
                entry_id = %entry.id,
                instrument_id = %instrument_id,
                %billing_date,
                "Credit charge without billing date, resolved from instrument cycle"
            );
            entry.billing_date = Some(billing_date);
            repaired += 1;
        }

        debug!(
            accounts = self.accounts.len(),
            entries = self.entries.len(),
            repaired,
            "Snapshot normalized"
        );
        Ok(repaired)
    }

    /// Records belonging to one account.
    ///
    /// Forecasts are attributed through their category; forecasts whose
    /// category is not in the snapshot cannot be attributed and are left out.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::AccountNotFound` if the account is unknown.
    pub fn view(&self, account_id: AccountId) -> Result<AccountView<'_>, SnapshotError> {
        let account = self
            .account(account_id)
            .ok_or(SnapshotError::AccountNotFound(account_id))?;

        let categories: Vec<Category> = self
            .categories
            .iter()
            .filter(|category| category.account_id == account_id)
            .cloned()
            .collect();
        let owned: HashSet<CategoryId> = categories.iter().map(|c| c.id).collect();

        Ok(AccountView {
            account,
            entries: self
                .entries
                .iter()
                .filter(|entry| entry.account_id == account_id)
                .cloned()
                .collect(),
            forecasts: self
                .forecasts
                .iter()
                .filter(|forecast| owned.contains(&forecast.category_id))
                .cloned()
                .collect(),
            categories,
        })
    }
}
