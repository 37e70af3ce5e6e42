//! Installment splitting in integer minor units.
//!
//! The total is converted to cents once, divided with integer arithmetic, and
//! the leftover cents go one each to the first installments:
//! 1. `base = cents / n`
//! 2. `leftover = cents - base * n`
//! 3. the first `leftover` installments get `base + 1`, the rest `base`
//!
//! The sum of the installments therefore equals the (cent-rounded) total.

use chrono::NaiveDate;
use cyclebook_shared::EngineConfig;
use cyclebook_shared::types::{AccountId, CategoryId, CreditInstrumentId, MinorUnits};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::InstallmentError;
use crate::ledger::{FlowType, LedgerEntry};
use crate::period::{ClosingDay, Period, PeriodKey, compute_period};

/// Accepted installment counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentRules {
    /// Smallest accepted count.
    pub min_count: u32,
    /// Largest accepted count.
    pub max_count: u32,
}

impl Default for InstallmentRules {
    fn default() -> Self {
        Self {
            min_count: 1,
            max_count: 12,
        }
    }
}

impl From<&EngineConfig> for InstallmentRules {
    fn from(config: &EngineConfig) -> Self {
        Self {
            min_count: config.min_installments.max(1),
            max_count: config.max_installments,
        }
    }
}

/// One installment of a split purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based position.
    pub number: u32,
    /// Total number of installments in the plan.
    pub count: u32,
    /// Billing cycle key.
    pub period_key: PeriodKey,
    /// Billing cycle of the instrument.
    pub period: Period,
    /// Statement closing date of the cycle (its last day).
    pub billing_date: NaiveDate,
    /// Installment amount (positive).
    pub amount: Decimal,
}

/// A purchase split into installments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentPlan {
    /// Cent-rounded purchase total.
    pub total: Decimal,
    /// Purchase date.
    pub purchase_date: NaiveDate,
    /// Closing day of the instrument.
    pub closing_day: ClosingDay,
    /// Installments in billing order.
    pub installments: Vec<Installment>,
}

/// Fields shared by every ledger entry created from a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTemplate {
    /// Account charged.
    pub account_id: AccountId,
    /// Category of the purchase.
    pub category_id: CategoryId,
    /// Instrument the purchase was made with.
    pub instrument_id: CreditInstrumentId,
    /// Flow of the category; expense installments are stored negative.
    pub flow_type: FlowType,
    /// Base description; each entry gets an `(i/n)` suffix when `n > 1`.
    pub description: String,
}

impl InstallmentPlan {
    /// Sum of all installment amounts.
    #[must_use]
    pub fn sum(&self) -> Decimal {
        self.installments.iter().map(|i| i.amount).sum()
    }

    /// Materializes one ledger entry per installment, each carrying its
    /// billing date so it classifies into its own cycle.
    #[must_use]
    pub fn into_entries(self, template: &EntryTemplate) -> Vec<LedgerEntry> {
        let purchase_date = self.purchase_date;
        self.installments
            .into_iter()
            .map(|installment| {
                let amount = match template.flow_type {
                    FlowType::Expense => -installment.amount,
                    FlowType::Income => installment.amount,
                };
                let description = if installment.count > 1 {
                    format!(
                        "{} ({}/{})",
                        template.description, installment.number, installment.count
                    )
                } else {
                    template.description.clone()
                };
                LedgerEntry::new(
                    template.account_id,
                    template.category_id,
                    purchase_date,
                    amount,
                    description,
                )
                .charged_to(template.instrument_id, Some(installment.billing_date))
            })
            .collect()
    }
}

/// Splits `total_cents` into `count` parts differing by at most one cent,
/// larger parts first.
///
/// Returns an empty vector when `count` is zero.
///
/// # Example
///
/// ```
/// use cyclebook_core::installment::allocate_minor_units;
///
/// assert_eq!(allocate_minor_units(10_000, 3), vec![3_334, 3_333, 3_333]);
/// ```
#[must_use]
pub fn allocate_minor_units(total_cents: i64, count: u32) -> Vec<i64> {
    if count == 0 {
        return vec![];
    }
    let n = i64::from(count);
    let base = total_cents.div_euclid(n);
    let leftover = total_cents - base * n;

    let mut parts: Vec<i64> = (0..n)
        .map(|i| if i < leftover { base + 1 } else { base })
        .collect();

    let allocated: i64 = parts.iter().sum();
    if allocated != total_cents {
        let missing = total_cents - allocated;
        warn!(
            total_cents,
            count, missing, "Installment remainder mismatch, folding into final installment"
        );
        if let Some(last) = parts.last_mut() {
            *last += missing;
        }
    }

    parts
}

/// Installment splitter with configurable count bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallmentSplitter {
    rules: InstallmentRules,
}

impl InstallmentSplitter {
    /// Creates a splitter with the given rules.
    #[must_use]
    pub const fn new(rules: InstallmentRules) -> Self {
        Self { rules }
    }

    /// Rules in effect.
    #[must_use]
    pub const fn rules(&self) -> InstallmentRules {
        self.rules
    }

    /// Splits a purchase.
    ///
    /// The first installment lands in the instrument cycle containing
    /// `purchase_date` (a purchase on or after the closing day therefore
    /// goes to the following statement); installment `i` lands `i` cycles
    /// later.
    ///
    /// # Errors
    ///
    /// - `InstallmentError::InvalidCount` if `count` is outside the rules
    /// - `InstallmentError::NonPositiveTotal` if `total <= 0`
    /// - `InstallmentError::AmountTooSmall` if some installment would be zero
    /// - `InstallmentError::Period` at the calendar extremes
    pub fn split(
        &self,
        total: Decimal,
        count: u32,
        purchase_date: NaiveDate,
        closing_day: ClosingDay,
    ) -> Result<InstallmentPlan, InstallmentError> {
        let InstallmentRules { min_count, max_count } = self.rules;
        if count == 0 || count < min_count || count > max_count {
            return Err(InstallmentError::InvalidCount {
                count,
                min: min_count,
                max: max_count,
            });
        }
        if total <= Decimal::ZERO {
            return Err(InstallmentError::NonPositiveTotal(total));
        }

        let cents = MinorUnits::from_decimal(total)
            .ok_or(InstallmentError::AmountOutOfRange(total))?
            .get();
        if cents < i64::from(count) {
            return Err(InstallmentError::AmountTooSmall { total, count });
        }

        let first_cycle = compute_period(purchase_date, closing_day)?;
        let mut cycle = first_cycle;
        let mut installments = Vec::with_capacity(count as usize);
        for (index, part) in allocate_minor_units(cents, count).into_iter().enumerate() {
            if index > 0 {
                cycle = cycle.next(closing_day)?;
            }
            installments.push(Installment {
                number: u32::try_from(index + 1).unwrap_or(count),
                count,
                period_key: cycle.key(),
                period: cycle,
                billing_date: cycle.end,
                amount: MinorUnits(part).to_decimal(),
            });
        }

        Ok(InstallmentPlan {
            total: MinorUnits(cents).to_decimal(),
            purchase_date,
            closing_day,
            installments,
        })
    }
}

/// Splits a purchase with the default rules (1 to 12 installments).
///
/// # Errors
///
/// See [`InstallmentSplitter::split`].
pub fn split_installments(
    total: Decimal,
    count: u32,
    purchase_date: NaiveDate,
    closing_day: ClosingDay,
) -> Result<Vec<Installment>, InstallmentError> {
    InstallmentSplitter::default()
        .split(total, count, purchase_date, closing_day)
        .map(|plan| plan.installments)
}
