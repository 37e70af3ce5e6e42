//! Property-based tests for carry-forward balances.
//!
//! - Property 3: Balance Conservation
//! - Property 4: Strategy Equivalence

use chrono::{Days, NaiveDate};
use cyclebook_shared::types::{AccountId, CategoryId, CreditInstrumentId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::index::RunningBalanceIndex;
use super::resolver::{net_flow, opening_balance};
use crate::ledger::{LedgerEntry, OPENING_BALANCE_MARKER};
use crate::period::{ClosingDay, compute_period};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
}

fn day_offset(offset: u64) -> NaiveDate {
    base_date().checked_add_days(Days::new(offset)).unwrap()
}

/// Strategy for one entry: plain, card charge with billing date, or sentinel.
fn entry_strategy() -> impl Strategy<Value = LedgerEntry> {
    (0u64..900, -500_000i64..500_000, 0u8..10, 0u64..45).prop_map(
        |(offset, cents, kind, billing_lag)| {
            let mut entry = LedgerEntry::new(
                AccountId::new(),
                CategoryId::new(),
                day_offset(offset),
                Decimal::new(cents, 2),
                "generated",
            );
            match kind {
                0..=2 => {
                    entry = entry.charged_to(
                        CreditInstrumentId::new(),
                        Some(day_offset(offset + billing_lag)),
                    );
                }
                3 => entry.description = OPENING_BALANCE_MARKER.to_string(),
                _ => {}
            }
            entry
        },
    )
}

fn entries_strategy() -> impl Strategy<Value = Vec<LedgerEntry>> {
    prop::collection::vec(entry_strategy(), 0..60)
}

fn closing_day_strategy() -> impl Strategy<Value = ClosingDay> {
    (ClosingDay::MIN..=ClosingDay::MAX).prop_map(|d| ClosingDay::new(d).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// **Property 3.1: opening(P_{n+1}) == opening(P_n) + net_flow(P_n).**
    #[test]
    fn prop_balance_conservation(
        entries in entries_strategy(),
        closing_day in closing_day_strategy(),
        offset in 0u64..900,
    ) {
        let period = compute_period(day_offset(offset), closing_day).unwrap();
        let next = period.next(closing_day).unwrap();
        prop_assert_eq!(
            opening_balance(&next, &entries),
            opening_balance(&period, &entries) + net_flow(&period, &entries)
        );
    }

    /// **Property 3.2: Conservation holds across a chain of periods.**
    #[test]
    fn prop_balance_conservation_chain(
        entries in entries_strategy(),
        closing_day in closing_day_strategy(),
    ) {
        let mut period = compute_period(base_date(), closing_day).unwrap();
        let mut carried = opening_balance(&period, &entries);
        for _ in 0..32 {
            carried += net_flow(&period, &entries);
            period = period.next(closing_day).unwrap();
            prop_assert_eq!(opening_balance(&period, &entries), carried);
        }
    }

    /// **Property 3.3: Entry order does not matter.**
    #[test]
    fn prop_opening_balance_order_independent(
        entries in entries_strategy(),
        closing_day in closing_day_strategy(),
        offset in 0u64..900,
    ) {
        let period = compute_period(day_offset(offset), closing_day).unwrap();
        let reversed: Vec<LedgerEntry> = entries.iter().rev().cloned().collect();
        prop_assert_eq!(opening_balance(&period, &entries), opening_balance(&period, &reversed));
    }

    /// **Property 4.1: The index agrees with the full re-sum.**
    #[test]
    fn prop_index_matches_full_resum(
        entries in entries_strategy(),
        closing_day in closing_day_strategy(),
        offset in 0u64..900,
    ) {
        let period = compute_period(day_offset(offset), closing_day).unwrap();
        let index = RunningBalanceIndex::build(&entries);
        prop_assert_eq!(index.opening_balance(&period), opening_balance(&period, &entries));
        prop_assert_eq!(
            index.closing_balance(&period),
            opening_balance(&period, &entries) + net_flow(&period, &entries)
        );
    }
}
