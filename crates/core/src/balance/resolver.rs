//! Opening, net and closing balance calculations.

use cyclebook_shared::BalanceStrategy;
use rust_decimal::Decimal;

use super::index::RunningBalanceIndex;
use crate::classify::{classification_date, counts_toward_flow, flow_entries_in};
use crate::ledger::LedgerEntry;
use crate::period::Period;

/// Balance carried into `period`.
///
/// Sums every entry whose classification date is strictly before
/// `period.start`. Sentinel entries may be present; they are skipped.
#[must_use]
pub fn opening_balance(period: &Period, entries: &[LedgerEntry]) -> Decimal {
    entries
        .iter()
        .filter(|entry| counts_toward_flow(entry) && classification_date(entry) < period.start)
        .map(|entry| entry.amount)
        .sum()
}

/// Signed sum of the flow entries classified into `period`.
#[must_use]
pub fn net_flow(period: &Period, entries: &[LedgerEntry]) -> Decimal {
    flow_entries_in(period, entries).map(|entry| entry.amount).sum()
}

/// Balance at the end of `period`: opening balance plus net flow.
#[must_use]
pub fn closing_balance(period: &Period, entries: &[LedgerEntry]) -> Decimal {
    opening_balance(period, entries) + net_flow(period, entries)
}

/// Resolves opening balances with the configured strategy.
///
/// Built from one snapshot of entries and dropped with it; there is nothing
/// to invalidate.
#[derive(Debug, Clone)]
pub enum BalanceResolver<'a> {
    /// Re-sum the entries on every request.
    Full(&'a [LedgerEntry]),
    /// Answer from a prefix-sum index.
    Indexed(RunningBalanceIndex),
}

impl<'a> BalanceResolver<'a> {
    /// Creates a resolver over `entries`.
    #[must_use]
    pub fn new(strategy: BalanceStrategy, entries: &'a [LedgerEntry]) -> Self {
        match strategy {
            BalanceStrategy::Full => Self::Full(entries),
            BalanceStrategy::Indexed => Self::Indexed(RunningBalanceIndex::build(entries)),
        }
    }

    /// Balance carried into `period`.
    #[must_use]
    pub fn opening_balance(&self, period: &Period) -> Decimal {
        match self {
            Self::Full(entries) => opening_balance(period, entries),
            Self::Indexed(index) => index.opening_balance(period),
        }
    }
}
