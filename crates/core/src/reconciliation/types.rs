//! Reconciliation data types.

use std::collections::HashMap;

use cyclebook_shared::types::CategoryId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{Category, FlowType};
use crate::period::Period;

/// Display name of the synthetic bucket for entries whose category is gone.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Grouping key of a reconciliation line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CategoryBucket {
    /// A known category.
    Category(CategoryId),
    /// Entries or forecasts pointing at a missing category, split by flow.
    Uncategorized(FlowType),
}

/// Actual vs forecast for one category in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReconciliation {
    /// Grouping key.
    pub bucket: CategoryBucket,
    /// Category name, or the uncategorized label.
    pub name: String,
    /// Parent category, for display grouping only.
    pub parent_id: Option<CategoryId>,
    /// Flow direction.
    pub flow_type: FlowType,
    /// Recorded amount. Expense magnitudes are positive.
    pub actual: Decimal,
    /// Forecasted amount.
    pub forecasted: Decimal,
    /// `forecasted - actual`.
    pub diff: Decimal,
    /// `actual / forecasted * 100`, or 0 when nothing was forecast.
    /// May exceed 100; never clamped.
    pub completion_pct: Decimal,
}

/// Summed figures for one flow direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowTotals {
    /// Total actual.
    pub actual: Decimal,
    /// Total forecasted.
    pub forecasted: Decimal,
    /// `forecasted - actual`.
    pub diff: Decimal,
    /// Overall completion percentage.
    pub completion_pct: Decimal,
}

/// Period totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationTotals {
    /// Income lines.
    pub income: FlowTotals,
    /// Expense lines.
    pub expense: FlowTotals,
    /// Income actual minus expense actual.
    pub net_actual: Decimal,
    /// Income forecast minus expense forecast.
    pub net_forecasted: Decimal,
}

/// Result of reconciling one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// Reconciled period.
    pub period: Period,
    /// One line per category with a nonzero actual or forecast.
    pub lines: Vec<CategoryReconciliation>,
    /// Totals over `lines`.
    pub totals: ReconciliationTotals,
}

/// Lines of one parent category, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Top-level bucket.
    pub bucket: CategoryBucket,
    /// Display name of the top-level bucket.
    pub name: String,
    /// The parent's own line (if any) followed by its children.
    pub lines: Vec<CategoryReconciliation>,
    /// Sum of `actual` over `lines`.
    pub actual: Decimal,
    /// Sum of `forecasted` over `lines`.
    pub forecasted: Decimal,
}

impl ReconciliationResult {
    /// Line for a bucket, if it survived the zero filter.
    #[must_use]
    pub fn line(&self, bucket: CategoryBucket) -> Option<&CategoryReconciliation> {
        self.lines.iter().find(|line| line.bucket == bucket)
    }

    /// Line for a known category.
    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&CategoryReconciliation> {
        self.line(CategoryBucket::Category(id))
    }

    /// Lines of one flow direction.
    pub fn lines_for(&self, flow: FlowType) -> impl Iterator<Item = &CategoryReconciliation> {
        self.lines.iter().filter(move |line| line.flow_type == flow)
    }

    /// Groups child lines under their parent for display.
    ///
    /// This is presentation only: forecasts were matched by exact category
    /// id and nothing is rolled up into the parent's own line.
    #[must_use]
    pub fn grouped_by_parent(&self, categories: &[Category]) -> Vec<CategoryGroup> {
        let names: HashMap<CategoryId, &str> = categories
            .iter()
            .map(|category| (category.id, category.name.as_str()))
            .collect();

        let mut groups: Vec<CategoryGroup> = Vec::new();
        for line in &self.lines {
            let bucket = match (line.bucket, line.parent_id) {
                (CategoryBucket::Category(_), Some(parent)) => CategoryBucket::Category(parent),
                (bucket, _) => bucket,
            };

            let position = groups.iter().position(|group| group.bucket == bucket);
            let group = if let Some(index) = position {
                &mut groups[index]
            } else {
                let name = match bucket {
                    CategoryBucket::Category(id) => names
                        .get(&id)
                        .map_or_else(|| UNCATEGORIZED_LABEL.to_string(), |name| (*name).to_string()),
                    CategoryBucket::Uncategorized(_) => UNCATEGORIZED_LABEL.to_string(),
                };
                groups.push(CategoryGroup {
                    bucket,
                    name,
                    lines: Vec::new(),
                    actual: Decimal::ZERO,
                    forecasted: Decimal::ZERO,
                });
                let last = groups.len() - 1;
                &mut groups[last]
            };

            group.actual += line.actual;
            group.forecasted += line.forecasted;
            if line.bucket == bucket {
                group.lines.insert(0, line.clone());
            } else {
                group.lines.push(line.clone());
            }
        }

        groups
    }
}
