//! Property-based tests for installment splitting.
//!
//! - Property 5: Penny-Exact Split
//! - Property 6: Consecutive Cycles

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::splitter::{allocate_minor_units, split_installments};
use crate::period::ClosingDay;

fn purchase_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..3_650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    })
}

fn closing_day_strategy() -> impl Strategy<Value = ClosingDay> {
    (ClosingDay::MIN..=ClosingDay::MAX).prop_map(|d| ClosingDay::new(d).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// **Property 5.1: Installments sum exactly to the total.**
    #[test]
    fn prop_split_sums_to_total(
        cents in 12i64..100_000_000,
        count in 2u32..=12,
        date in purchase_date_strategy(),
        closing_day in closing_day_strategy(),
    ) {
        let total = Decimal::new(cents, 2);
        let installments = split_installments(total, count, date, closing_day).unwrap();
        prop_assert_eq!(installments.len(), count as usize);
        prop_assert_eq!(installments.iter().map(|i| i.amount).sum::<Decimal>(), total);
    }

    /// **Property 5.2: Parts differ by at most one cent, larger parts first.**
    #[test]
    fn prop_parts_differ_by_at_most_one_cent(
        cents in 1i64..100_000_000,
        count in 1u32..=12,
    ) {
        let parts = allocate_minor_units(cents, count);
        prop_assert_eq!(parts.iter().sum::<i64>(), cents);
        for pair in parts.windows(2) {
            prop_assert!(pair[0] >= pair[1]);
            prop_assert!(pair[0] - pair[1] <= 1);
        }
    }

    /// **Property 6.1: Installment i+1 lands in the cycle after installment i.**
    #[test]
    fn prop_installments_in_consecutive_cycles(
        count in 1u32..=12,
        date in purchase_date_strategy(),
        closing_day in closing_day_strategy(),
    ) {
        let installments = split_installments(Decimal::new(120_000, 2), count, date, closing_day).unwrap();
        prop_assert!(installments[0].period.contains_date(date));
        for pair in installments.windows(2) {
            prop_assert_eq!(pair[1].period.start, pair[0].period.end.succ_opt().unwrap());
            prop_assert!(pair[1].period_key > pair[0].period_key);
        }
    }
}
