//! Reconciliation service.

use std::collections::{BTreeMap, HashMap};

use cyclebook_shared::types::CategoryId;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::types::{
    CategoryBucket, CategoryReconciliation, FlowTotals, ReconciliationResult,
    ReconciliationTotals, UNCATEGORIZED_LABEL,
};
use crate::classify::flow_entries_in;
use crate::ledger::{Category, FlowType, ForecastEntry, LedgerEntry};
use crate::period::Period;

/// Service for forecast-vs-actual reconciliation.
pub struct ReconciliationService;

#[derive(Default)]
struct Accumulator {
    signed_actual: Decimal,
    forecasted: Decimal,
}

impl ReconciliationService {
    /// Reconciles one period.
    ///
    /// 1. keep entries classified into `period`, skipping sentinels
    /// 2. sum actual per category (expense as magnitude)
    /// 3. keep forecasts whose `period_end == period.end`, sum per exact id
    /// 4. compute diff and completion per category
    /// 5. drop categories where both actual and forecast are zero
    /// 6. total the remaining lines per flow direction
    ///
    /// Entries whose category is not in `categories` are routed to an
    /// uncategorized bucket (direction taken from the amount sign) instead of
    /// failing the whole period. Forecasts for unknown categories go to the
    /// uncategorized expense bucket.
    #[must_use]
    pub fn reconcile(
        period: &Period,
        entries: &[LedgerEntry],
        forecasts: &[ForecastEntry],
        categories: &[Category],
    ) -> ReconciliationResult {
        let known: HashMap<CategoryId, &Category> = categories
            .iter()
            .map(|category| (category.id, category))
            .collect();

        let mut buckets: BTreeMap<CategoryBucket, Accumulator> = BTreeMap::new();
        let mut orphaned_entries = 0usize;

        for entry in flow_entries_in(period, entries) {
            let bucket = if known.contains_key(&entry.category_id) {
                CategoryBucket::Category(entry.category_id)
            } else {
                orphaned_entries += 1;
                CategoryBucket::Uncategorized(FlowType::from_amount(entry.amount))
            };
            buckets.entry(bucket).or_default().signed_actual += entry.amount;
        }

        let mut orphaned_forecasts = 0usize;
        for forecast in forecasts.iter().filter(|forecast| forecast.matches(period)) {
            let bucket = if known.contains_key(&forecast.category_id) {
                CategoryBucket::Category(forecast.category_id)
            } else {
                orphaned_forecasts += 1;
                CategoryBucket::Uncategorized(FlowType::Expense)
            };
            buckets.entry(bucket).or_default().forecasted += forecast.forecasted_amount;
        }

        if orphaned_entries > 0 || orphaned_forecasts > 0 {
            warn!(
                period = %period,
                orphaned_entries,
                orphaned_forecasts,
                "Records reference unknown categories, routed to {UNCATEGORIZED_LABEL}"
            );
        }

        let mut lines: Vec<CategoryReconciliation> = buckets
            .into_iter()
            .filter_map(|(bucket, acc)| {
                let (name, parent_id, flow_type) = match bucket {
                    CategoryBucket::Category(id) => {
                        let category = known.get(&id)?;
                        (category.name.clone(), category.parent_id, category.flow_type)
                    }
                    CategoryBucket::Uncategorized(flow) => {
                        (UNCATEGORIZED_LABEL.to_string(), None, flow)
                    }
                };
                let actual = flow_type.reported(acc.signed_actual);
                if actual.is_zero() && acc.forecasted.is_zero() {
                    return None;
                }
                Some(CategoryReconciliation {
                    bucket,
                    name,
                    parent_id,
                    flow_type,
                    actual,
                    forecasted: acc.forecasted,
                    diff: acc.forecasted - actual,
                    completion_pct: Self::completion_pct(actual, acc.forecasted),
                })
            })
            .collect();

        lines.sort_by(|a, b| {
            a.flow_type
                .cmp(&b.flow_type)
                .then_with(|| {
                    matches!(a.bucket, CategoryBucket::Uncategorized(_))
                        .cmp(&matches!(b.bucket, CategoryBucket::Uncategorized(_)))
                })
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.bucket.cmp(&b.bucket))
        });

        let totals = Self::totals(&lines);
        debug!(
            period = %period,
            lines = lines.len(),
            net_actual = %totals.net_actual,
            "Period reconciled"
        );

        ReconciliationResult {
            period: *period,
            lines,
            totals,
        }
    }

    /// Completion percentage: `actual / forecasted * 100` rounded to two
    /// places, or zero when nothing (or a non-positive amount) was forecast.
    ///
    /// Values above 100 are reported as-is.
    #[must_use]
    pub fn completion_pct(actual: Decimal, forecasted: Decimal) -> Decimal {
        if forecasted <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        actual
            .checked_div(forecasted)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Decimal::ZERO, |pct| pct.round_dp(2))
    }

    /// Sums lines into per-flow totals.
    #[must_use]
    pub fn totals(lines: &[CategoryReconciliation]) -> ReconciliationTotals {
        let flow_totals = |flow: FlowType| {
            let (actual, forecasted) = lines
                .iter()
                .filter(|line| line.flow_type == flow)
                .fold((Decimal::ZERO, Decimal::ZERO), |(a, f), line| {
                    (a + line.actual, f + line.forecasted)
                });
            FlowTotals {
                actual,
                forecasted,
                diff: forecasted - actual,
                completion_pct: Self::completion_pct(actual, forecasted),
            }
        };

        let income = flow_totals(FlowType::Income);
        let expense = flow_totals(FlowType::Expense);
        ReconciliationTotals {
            net_actual: income.actual - expense.actual,
            net_forecasted: income.forecasted - expense.forecasted,
            income,
            expense,
        }
    }
}
