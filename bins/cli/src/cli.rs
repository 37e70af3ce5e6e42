//! Command line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use cyclebook_core::period::MAX_PERIOD_SPAN;
use cyclebook_shared::BalanceStrategy;
use cyclebook_shared::types::AccountId;
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(name = "cyclebook")]
#[command(author = "Cyclebook Team")]
#[command(version)]
#[command(about = "Statement-cycle accounting and reconciliation", long_about = None)]
pub struct Cli {
    /// Emit logs as JSON lines (overrides `logging.json`)
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the statement period containing a date
    Period {
        /// Reference date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Closing day of the account or instrument (1-31)
        #[arg(long)]
        closing_day: u32,
        /// Number of consecutive periods to print
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PERIOD_SPAN)))]
        count: u32,
    },

    /// Split a credit purchase into installments
    Split {
        /// Purchase total
        #[arg(long)]
        total: Decimal,
        /// Number of installments
        #[arg(long)]
        count: u32,
        /// Purchase date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Closing day of the credit instrument (1-31)
        #[arg(long)]
        closing_day: u32,
    },

    /// Period report for one account
    Report {
        /// Account ID
        #[arg(long)]
        account: AccountId,
        /// Reference date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Number of consecutive periods to report
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PERIOD_SPAN)))]
        periods: u32,
        /// Ledger snapshot file (defaults to `snapshot.path`)
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Opening balance strategy (defaults to `engine.balance_strategy`)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
    },

    /// Period reports for every account in the snapshot
    Reports {
        /// Reference date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Ledger snapshot file (defaults to `snapshot.path`)
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Opening balance strategy (defaults to `engine.balance_strategy`)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
    },
}

/// Command line spelling of [`BalanceStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Re-sum every earlier entry
    Full,
    /// Prefix-sum index built once per snapshot
    Indexed,
}

impl From<StrategyArg> for BalanceStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Full => Self::Full,
            StrategyArg::Indexed => Self::Indexed,
        }
    }
}
