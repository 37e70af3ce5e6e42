//! Prefix-sum index of running balances.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::classify::{classification_date, counts_toward_flow};
use crate::ledger::LedgerEntry;
use crate::period::Period;

/// Running balance after every flow entry classified on or before `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    /// Classification date.
    pub date: NaiveDate,
    /// Balance at the end of that date.
    pub balance: Decimal,
}

/// Running balances sorted by classification date, one point per date.
///
/// Answers opening-balance queries in `O(log n)`. The index is built from a
/// single snapshot of entries and holds no reference to it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalanceIndex {
    points: Vec<BalancePoint>,
}

impl RunningBalanceIndex {
    /// Builds the index from a set of entries in any order.
    #[must_use]
    pub fn build(entries: &[LedgerEntry]) -> Self {
        let mut dated: Vec<(NaiveDate, Decimal)> = entries
            .iter()
            .filter(|entry| counts_toward_flow(entry))
            .map(|entry| (classification_date(entry), entry.amount))
            .collect();
        dated.sort_by_key(|(date, _)| *date);

        let mut points: Vec<BalancePoint> = Vec::new();
        let mut running = Decimal::ZERO;
        for (date, amount) in dated {
            running += amount;
            match points.last_mut() {
                Some(last) if last.date == date => last.balance = running,
                _ => points.push(BalancePoint {
                    date,
                    balance: running,
                }),
            }
        }

        Self { points }
    }

    /// Balance from every entry classified strictly before `date`.
    #[must_use]
    pub fn balance_before(&self, date: NaiveDate) -> Decimal {
        let idx = self.points.partition_point(|point| point.date < date);
        idx.checked_sub(1)
            .and_then(|i| self.points.get(i))
            .map_or(Decimal::ZERO, |point| point.balance)
    }

    /// Balance carried into `period`.
    #[must_use]
    pub fn opening_balance(&self, period: &Period) -> Decimal {
        self.balance_before(period.start)
    }

    /// Balance at the end of `period`.
    #[must_use]
    pub fn closing_balance(&self, period: &Period) -> Decimal {
        period
            .end
            .succ_opt()
            .map_or_else(|| self.final_balance(), |day_after| self.balance_before(day_after))
    }

    /// Balance after every indexed entry.
    #[must_use]
    pub fn final_balance(&self) -> Decimal {
        self.points.last().map_or(Decimal::ZERO, |point| point.balance)
    }

    /// Indexed points, oldest first.
    #[must_use]
    pub fn points(&self) -> &[BalancePoint] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyclebook_shared::types::{AccountId, CategoryId};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(on: NaiveDate, amount: Decimal) -> LedgerEntry {
        LedgerEntry::new(AccountId::new(), CategoryId::new(), on, amount, "entry")
    }

    #[test]
    fn test_points_collapse_same_date() {
        let index = RunningBalanceIndex::build(&[
            entry(date(2024, 1, 5), dec!(10)),
            entry(date(2024, 1, 2), dec!(5)),
            entry(date(2024, 1, 5), dec!(-3)),
        ]);
        assert_eq!(
            index.points(),
            &[
                BalancePoint { date: date(2024, 1, 2), balance: dec!(5) },
                BalancePoint { date: date(2024, 1, 5), balance: dec!(12) },
            ]
        );
    }

    #[test]
    fn test_balance_before() {
        let index = RunningBalanceIndex::build(&[
            entry(date(2024, 1, 2), dec!(5)),
            entry(date(2024, 1, 5), dec!(7)),
        ]);
        assert_eq!(index.balance_before(date(2024, 1, 1)), Decimal::ZERO);
        assert_eq!(index.balance_before(date(2024, 1, 2)), Decimal::ZERO);
        assert_eq!(index.balance_before(date(2024, 1, 3)), dec!(5));
        assert_eq!(index.balance_before(date(2024, 1, 5)), dec!(5));
        assert_eq!(index.balance_before(date(2024, 1, 6)), dec!(12));
        assert_eq!(index.final_balance(), dec!(12));
    }

    #[test]
    fn test_empty_index() {
        let index = RunningBalanceIndex::build(&[]);
        assert_eq!(index.balance_before(date(2024, 1, 1)), Decimal::ZERO);
        assert_eq!(index.final_balance(), Decimal::ZERO);
    }
}
