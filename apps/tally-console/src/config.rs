//! # Console Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TALLY_STORE_NAME="Original Electronics"                            │
//! │     TALLY_DB_PATH=./tally_dev.db                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <PATH>, or TALLY_CONFIG, or                               │
//! │     ~/.config/tally/tally.toml (Linux)                                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # tally.toml
//! store_name = "Original Electronics"
//! currency_symbol = "$"
//! database_path = "/var/lib/tally/tally.db"
//! log_filter = "info,tally=debug,sqlx=warn"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tally_core::defaults::DEFAULT_STORE_NAME;
use tally_core::Money;
use tracing::debug;

use crate::error::{ConsoleError, ConsoleResult};

pub const DEFAULT_LOG_FILTER: &str = "info,tally=debug,sqlx=warn";

/// Console configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Shown on reports and used in backup file names.
    pub store_name: String,

    pub currency_symbol: String,

    /// Store file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// `tracing` filter directive. `RUST_LOG` still wins when set.
    pub log_filter: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            store_name: DEFAULT_STORE_NAME.to_string(),
            currency_symbol: "$".to_string(),
            database_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`tally.toml`), if it exists
    /// 3. `TALLY_*` environment variables
    ///
    /// An explicitly given path must exist.
    pub fn load(config_path: Option<&Path>) -> ConsoleResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match std::env::var_os("TALLY_CONFIG")
                .map(PathBuf::from)
                .or_else(Self::default_config_path)
            {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConsoleResult<Self> {
        debug!(?path, "Loading console config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `TALLY_*` overrides. `lookup` stands in for `std::env::var`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("TALLY_STORE_NAME") {
            self.store_name = name;
        }
        if let Some(symbol) = lookup("TALLY_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }
        if let Some(path) = lookup("TALLY_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }
        if let Some(filter) = lookup("TALLY_LOG") {
            self.log_filter = filter;
        }
    }

    pub fn validate(&self) -> ConsoleResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(ConsoleError::Config("store_name must not be empty".into()));
        }
        Ok(())
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "tally")
            .map(|dirs| dirs.config_dir().join("tally.toml"))
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConsoleConfig::default();
    /// assert_eq!(config.format_currency(Money::new(-12.5)), "-$12.50");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let value = amount.amount();
        format!(
            "{}{}{:.2}",
            if value < 0.0 { "-" } else { "" },
            self.currency_symbol,
            value.abs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.store_name, "Original Electronics");
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ConsoleConfig = toml::from_str(r#"store_name = "Corner Shop""#).unwrap();
        assert_eq!(config.store_name, "Corner Shop");
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config: ConsoleConfig = toml::from_str(
            r#"
            store_name = "Corner Shop"
            database_path = "/tmp/file.db"
            "#,
        )
        .unwrap();

        let env: HashMap<&str, &str> = [("TALLY_DB_PATH", "/tmp/env.db"), ("TALLY_CURRENCY_SYMBOL", "SL")]
            .into_iter()
            .collect();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.store_name, "Corner Shop");
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/env.db")));
        assert_eq!(config.currency_symbol, "SL");
    }

    #[test]
    fn test_load_explicit_file() {
        let path = std::env::temp_dir().join(format!("tally-config-{}.toml", std::process::id()));
        std::fs::write(&path, "store_name = \"Kiosk\"\nlog_filter = \"warn\"\n").unwrap();

        let config = ConsoleConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.store_name, "Kiosk");
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let err = toml::from_str::<ConsoleConfig>("store_name = 5").map_err(ConsoleError::from);
        assert!(matches!(err, Err(ConsoleError::Config(_))));
    }

    #[test]
    fn test_blank_store_name_rejected() {
        let config = ConsoleConfig {
            store_name: "  ".into(),
            ..ConsoleConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_format_currency() {
        let config = ConsoleConfig::default();
        assert_eq!(config.format_currency(Money::new(1234.5)), "$1234.50");
        assert_eq!(config.format_currency(Money::new(-12.5)), "-$12.50");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
    }
}
