//! Dual-date classification rule.
//!
//! Every function here is pure: classifying the same entry twice, or a set of
//! entries in any order, yields the same answer.

use chrono::NaiveDate;

use crate::ledger::LedgerEntry;
use crate::period::{ClosingDay, Period, PeriodError, PeriodKey, compute_period};

/// Date that governs which period an entry belongs to.
///
/// A billing date only counts when the entry is also linked to a credit
/// instrument; a stray billing date on a plain entry is ignored.
#[must_use]
pub fn classification_date(entry: &LedgerEntry) -> NaiveDate {
    match (entry.credit_instrument_id, entry.billing_date) {
        (Some(_), Some(billing_date)) => billing_date,
        _ => entry.date,
    }
}

/// Period containing the entry for the given closing day.
///
/// Sentinel entries are classified like any other entry so callers can
/// display them.
///
/// # Errors
///
/// Returns `PeriodError::DateOutOfRange` for dates at the calendar extremes.
pub fn period_of(entry: &LedgerEntry, closing_day: ClosingDay) -> Result<Period, PeriodError> {
    compute_period(classification_date(entry), closing_day)
}

/// Period key (year-month of the period end) of an entry.
///
/// # Errors
///
/// Returns `PeriodError::DateOutOfRange` for dates at the calendar extremes.
pub fn classify(entry: &LedgerEntry, closing_day: ClosingDay) -> Result<PeriodKey, PeriodError> {
    period_of(entry, closing_day).map(|period| period.key())
}

/// Returns true if the entry counts toward flow sums.
///
/// Opening-balance sentinels exist as records but never count as flow.
#[must_use]
pub fn counts_toward_flow(entry: &LedgerEntry) -> bool {
    !entry.is_opening_balance()
}

/// Returns true if the entry's classification date falls inside `period`.
#[must_use]
pub fn is_in_period(entry: &LedgerEntry, period: &Period) -> bool {
    period.contains_date(classification_date(entry))
}

/// Entries classified into `period` that count toward flow.
pub fn flow_entries_in<'a>(
    period: &'a Period,
    entries: &'a [LedgerEntry],
) -> impl Iterator<Item = &'a LedgerEntry> + 'a {
    entries
        .iter()
        .filter(move |entry| counts_toward_flow(entry) && is_in_period(entry, period))
}

/// Billing date for a purchase on a credit instrument: the last day of the
/// instrument cycle containing the purchase (its statement closing date).
///
/// # Errors
///
/// Returns `PeriodError::DateOutOfRange` for dates at the calendar extremes.
pub fn resolve_billing_date(
    purchase_date: NaiveDate,
    instrument_closing_day: ClosingDay,
) -> Result<NaiveDate, PeriodError> {
    compute_period(purchase_date, instrument_closing_day).map(|cycle| cycle.end)
}
