//! Cyclebook command line
//!
//! Computes statement periods, installment plans and period reports from a
//! JSON ledger snapshot.

mod cli;
mod commands;
mod errors;

use std::process::ExitCode;

use clap::Parser;
use cyclebook_shared::{AppConfig, AppError, LoggingConfig};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration (also reads .env)
    let config = match AppConfig::load_with_dotenv() {
        Ok(config) => config,
        Err(e) => {
            let err = AppError::from(e);
            eprintln!("{err}");
            return exit_code(&err);
        }
    };

    init_tracing(&config.logging, cli.json_logs);

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<AppError>()
                .map_or("INTERNAL_ERROR", AppError::error_code);
            error!(error_code = code, "{e:#}");
            eprintln!(
                "{}",
                serde_json::json!({
                    "error": code,
                    "message": format!("{e:#}"),
                })
            );
            e.downcast_ref::<AppError>()
                .map_or(ExitCode::FAILURE, exit_code)
        }
    }
}

fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Command::Period {
            date,
            closing_day,
            count,
        } => commands::period(date, closing_day, count),
        Command::Split {
            total,
            count,
            date,
            closing_day,
        } => commands::split(config, total, count, date, closing_day),
        Command::Report {
            account,
            date,
            periods,
            snapshot,
            strategy,
        } => commands::report(
            config,
            account,
            date,
            periods,
            snapshot.as_deref(),
            strategy.map(Into::into),
        ),
        Command::Reports {
            date,
            snapshot,
            strategy,
        } => commands::reports(config, date, snapshot.as_deref(), strategy.map(Into::into)),
    }
}

/// Logs go to stderr; stdout carries the JSON output.
fn init_tracing(logging: &LoggingConfig, force_json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json || force_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn exit_code(err: &AppError) -> ExitCode {
    u8::try_from(err.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
}
