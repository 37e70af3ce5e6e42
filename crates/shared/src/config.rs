//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Snapshot source configuration.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

/// How opening balances are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceStrategy {
    /// Re-sum every earlier entry on each request.
    #[default]
    Full,
    /// Build a prefix-sum index once per snapshot and binary-search it.
    Indexed,
}

/// Engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Opening balance resolution strategy.
    #[serde(default)]
    pub balance_strategy: BalanceStrategy,
    /// Smallest accepted installment count.
    #[serde(default = "default_min_installments")]
    pub min_installments: u32,
    /// Largest accepted installment count.
    #[serde(default = "default_max_installments")]
    pub max_installments: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            balance_strategy: BalanceStrategy::default(),
            min_installments: default_min_installments(),
            max_installments: default_max_installments(),
        }
    }
}

fn default_min_installments() -> u32 {
    1
}

fn default_max_installments() -> u32 {
    12
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "cyclebook=info".to_string()
}

/// Snapshot source configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotConfig {
    /// Default path of the JSON ledger snapshot.
    #[serde(default)]
    pub path: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CYCLEBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Loads `.env` (if present) and then the layered configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load_with_dotenv() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        Self::load()
    }
}
