//! Report generation service.

use chrono::NaiveDate;
use cyclebook_shared::BalanceStrategy;
use cyclebook_shared::types::{AccountId, Money};
use rayon::prelude::*;
use tracing::debug;

use super::error::ReportError;
use super::types::PeriodReport;
use crate::balance::{BalanceResolver, net_flow};
use crate::period::{MAX_PERIOD_SPAN, Period, compute_period};
use crate::reconciliation::ReconciliationService;
use crate::snapshot::{AccountView, LedgerSnapshot};

/// Service for generating period reports.
///
/// Reports read a normalized snapshot (see [`LedgerSnapshot::normalize`]) and
/// never mutate it.
pub struct ReportService;

impl ReportService {
    /// Generates the report for the period containing `reference_date`.
    ///
    /// # Errors
    ///
    /// - `ReportError::Snapshot` if the account is not in the snapshot
    /// - `ReportError::Period` at the calendar extremes
    pub fn period_report(
        snapshot: &LedgerSnapshot,
        account_id: AccountId,
        reference_date: NaiveDate,
        strategy: BalanceStrategy,
    ) -> Result<PeriodReport, ReportError> {
        let view = snapshot.view(account_id)?;
        let period = compute_period(reference_date, view.account.closing_day)?;
        let resolver = BalanceResolver::new(strategy, &view.entries);
        Ok(Self::assemble(snapshot, &view, &resolver, period))
    }

    /// Generates `count` consecutive reports starting with the period that
    /// contains `reference_date`.
    ///
    /// The balance resolver is built once and shared by every period.
    ///
    /// # Errors
    ///
    /// - `ReportError::TooManyPeriods` if `count` exceeds [`MAX_PERIOD_SPAN`]
    /// - otherwise the same as [`ReportService::period_report`]
    pub fn period_reports(
        snapshot: &LedgerSnapshot,
        account_id: AccountId,
        reference_date: NaiveDate,
        count: u32,
        strategy: BalanceStrategy,
    ) -> Result<Vec<PeriodReport>, ReportError> {
        if count > MAX_PERIOD_SPAN {
            return Err(ReportError::TooManyPeriods {
                requested: count,
                max: MAX_PERIOD_SPAN,
            });
        }
        let view = snapshot.view(account_id)?;
        let closing_day = view.account.closing_day;
        let resolver = BalanceResolver::new(strategy, &view.entries);

        let mut reports = Vec::with_capacity(count as usize);
        let mut period = compute_period(reference_date, closing_day)?;
        for index in 0..count {
            if index > 0 {
                period = period.next(closing_day)?;
            }
            reports.push(Self::assemble(snapshot, &view, &resolver, period));
        }
        Ok(reports)
    }

    /// Report for the period after `report`.
    ///
    /// # Errors
    ///
    /// Same as [`ReportService::period_report`].
    pub fn next_report(
        snapshot: &LedgerSnapshot,
        report: &PeriodReport,
        strategy: BalanceStrategy,
    ) -> Result<PeriodReport, ReportError> {
        let period = report.period.next(report.closing_day)?;
        Self::period_report(snapshot, report.account_id, period.start, strategy)
    }

    /// Report for the period before `report`.
    ///
    /// # Errors
    ///
    /// Same as [`ReportService::period_report`].
    pub fn previous_report(
        snapshot: &LedgerSnapshot,
        report: &PeriodReport,
        strategy: BalanceStrategy,
    ) -> Result<PeriodReport, ReportError> {
        let period = report.period.previous(report.closing_day)?;
        Self::period_report(snapshot, report.account_id, period.start, strategy)
    }

    /// Generates the report for every account of the snapshot, each with its
    /// own closing day. Accounts are processed in parallel; the result keeps
    /// the snapshot's account order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub fn reports_for_all_accounts(
        snapshot: &LedgerSnapshot,
        reference_date: NaiveDate,
        strategy: BalanceStrategy,
    ) -> Result<Vec<PeriodReport>, ReportError> {
        snapshot
            .accounts
            .par_iter()
            .map(|account| Self::period_report(snapshot, account.id, reference_date, strategy))
            .collect()
    }

    fn assemble(
        snapshot: &LedgerSnapshot,
        view: &AccountView<'_>,
        resolver: &BalanceResolver<'_>,
        period: Period,
    ) -> PeriodReport {
        let account = view.account;
        let opening = resolver.opening_balance(&period);
        let flow = net_flow(&period, &view.entries);
        let reconciliation = ReconciliationService::reconcile(
            &period,
            &view.entries,
            &view.forecasts,
            &view.categories,
        );

        debug!(
            account_id = %account.id,
            period = %period,
            opening = %opening,
            net_flow = %flow,
            lines = reconciliation.lines.len(),
            "Period report assembled"
        );

        PeriodReport {
            account_id: account.id,
            account_name: account.name.clone(),
            currency: account.currency,
            closing_day: account.closing_day,
            period,
            key: period.key(),
            as_of: snapshot.as_of,
            opening_balance: Money::new(opening, account.currency),
            net_flow: Money::new(flow, account.currency),
            closing_balance: Money::new(opening + flow, account.currency),
            reconciliation,
        }
    }
}
