//! Command handlers.
//!
//! Every handler prints one JSON document to stdout.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use cyclebook_core::installment::{InstallmentRules, InstallmentSplitter};
use cyclebook_core::period::{ClosingDay, MAX_PERIOD_SPAN, compute_period};
use cyclebook_core::report::ReportService;
use cyclebook_core::snapshot::{LedgerSnapshot, SnapshotDocument};
use cyclebook_shared::types::AccountId;
use cyclebook_shared::{AppConfig, AppError, BalanceStrategy};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tracing::info;

use crate::errors::{
    map_installment_error, map_period_error, map_report_error, map_snapshot_error,
};

/// Prints `count` consecutive periods starting with the one containing `date`.
pub fn period(date: NaiveDate, closing_day: u32, count: u32) -> anyhow::Result<()> {
    if count > MAX_PERIOD_SPAN {
        return Err(AppError::Validation(format!(
            "count {count} exceeds the limit of {MAX_PERIOD_SPAN} periods"
        ))
        .into());
    }
    let closing_day = ClosingDay::new(closing_day).map_err(|e| map_period_error(&e))?;
    let mut period = compute_period(date, closing_day).map_err(|e| map_period_error(&e))?;

    let mut periods = Vec::with_capacity(count as usize);
    for index in 0..count {
        if index > 0 {
            period = period.next(closing_day).map_err(|e| map_period_error(&e))?;
        }
        periods.push(json!({
            "key": period.key(),
            "start": period.start,
            "end": period.end,
            "days": period.days(),
        }));
    }

    print_json(&Value::Array(periods))
}

/// Prints the installment plan of a purchase.
pub fn split(
    config: &AppConfig,
    total: Decimal,
    count: u32,
    date: NaiveDate,
    closing_day: u32,
) -> anyhow::Result<()> {
    let closing_day = ClosingDay::new(closing_day).map_err(|e| map_period_error(&e))?;
    let splitter = InstallmentSplitter::new(InstallmentRules::from(&config.engine));
    let plan = splitter
        .split(total, count, date, closing_day)
        .map_err(|e| map_installment_error(&e))?;

    print_json(&plan)
}

/// Prints `periods` consecutive reports for one account.
pub fn report(
    config: &AppConfig,
    account: AccountId,
    date: NaiveDate,
    periods: u32,
    snapshot: Option<&Path>,
    strategy: Option<BalanceStrategy>,
) -> anyhow::Result<()> {
    let snapshot = load_snapshot(config, snapshot)?;
    let strategy = strategy.unwrap_or(config.engine.balance_strategy);

    let reports = ReportService::period_reports(&snapshot, account, date, periods.max(1), strategy)
        .map_err(|e| map_report_error(&e))?;

    if let [single] = reports.as_slice() {
        print_json(single)
    } else {
        print_json(&reports)
    }
}

/// Prints the report of every account for the period containing `date`.
pub fn reports(
    config: &AppConfig,
    date: NaiveDate,
    snapshot: Option<&Path>,
    strategy: Option<BalanceStrategy>,
) -> anyhow::Result<()> {
    let snapshot = load_snapshot(config, snapshot)?;
    let strategy = strategy.unwrap_or(config.engine.balance_strategy);

    let reports = ReportService::reports_for_all_accounts(&snapshot, date, strategy)
        .map_err(|e| map_report_error(&e))?;

    print_json(&reports)
}

/// Reads, validates and normalizes a snapshot file.
fn load_snapshot(config: &AppConfig, path: Option<&Path>) -> anyhow::Result<LedgerSnapshot> {
    let path: PathBuf = match (path, config.snapshot.path.as_deref()) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(configured)) => PathBuf::from(configured),
        (None, None) => {
            return Err(AppError::Configuration(
                "no snapshot given: pass --snapshot or set snapshot.path".to_string(),
            )
            .into());
        }
    };

    let raw = std::fs::read_to_string(&path)
        .map_err(AppError::from)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    let document: SnapshotDocument = serde_json::from_str(&raw)
        .map_err(AppError::from)
        .with_context(|| format!("decoding snapshot {}", path.display()))?;
    let mut snapshot = LedgerSnapshot::try_from(document)
        .map_err(|e| map_snapshot_error(&e))
        .with_context(|| format!("loading snapshot {}", path.display()))?;
    let repaired = snapshot.normalize().map_err(|e| map_snapshot_error(&e))?;

    info!(
        path = %path.display(),
        as_of = %snapshot.as_of,
        accounts = snapshot.accounts.len(),
        entries = snapshot.entries.len(),
        repaired,
        "Snapshot loaded"
    );
    Ok(snapshot)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(AppError::from)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_snapshot(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cyclebook-{}-{name}.json", AccountId::new()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn app_error(err: &anyhow::Error) -> &AppError {
        err.downcast_ref::<AppError>().unwrap()
    }

    #[test]
    fn test_bad_closing_day_in_snapshot_is_configuration_error() {
        let path = write_snapshot(
            "bad-closing-day",
            &format!(
                r#"{{
                    "as_of": "2024-04-01T12:00:00Z",
                    "accounts": [{{"id": "{}", "closing_day": 32, "currency": "BRL"}}]
                }}"#,
                AccountId::new()
            ),
        );

        let err = load_snapshot(&AppConfig::default(), Some(&path)).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert_eq!(app_error(&err).error_code(), "CONFIGURATION_ERROR");
        assert_eq!(app_error(&err).exit_code(), 78);
    }

    #[test]
    fn test_malformed_snapshot_is_serialization_error() {
        let path = write_snapshot("malformed", "{ not json");

        let err = load_snapshot(&AppConfig::default(), Some(&path)).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert_eq!(app_error(&err).error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_valid_snapshot_loads() {
        let path = write_snapshot(
            "valid",
            &format!(
                r#"{{
                    "as_of": "2024-04-01T12:00:00Z",
                    "accounts": [{{"id": "{}", "closing_day": 10, "currency": "USD"}}]
                }}"#,
                AccountId::new()
            ),
        );

        let snapshot = load_snapshot(&AppConfig::default(), Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(snapshot.accounts[0].closing_day.get(), 10);
    }

    #[test]
    fn test_missing_snapshot_path_is_configuration_error() {
        let err = load_snapshot(&AppConfig::default(), None).unwrap_err();
        assert_eq!(app_error(&err).error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_period_count_above_limit_rejected() {
        let err = period(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), 10, u32::MAX).unwrap_err();
        assert_eq!(app_error(&err).error_code(), "VALIDATION_ERROR");
    }
}
