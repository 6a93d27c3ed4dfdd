//! # Tally Console Library
//!
//! Operator console for the Tally point of sale.
//!
//! ## Module Organization
//! ```text
//! tally_console/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── ConsoleConfig (env > tally.toml > defaults)
//! ├── state.rs        ◄─── AppState: Shop + Database + config
//! ├── commands/       ◄─── One module per command
//! └── error.rs        ◄─── ConsoleError and exit codes
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::ConsoleConfig;
use error::{ConsoleError, ConsoleResult};
use state::AppState;
use tally_db::{Database, DbConfig};

/// Runs one command line and returns what to print.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Console Startup                                   │
/// │                                                                         │
/// │  1. Parse Arguments ──────────────────────────────────────────────────► │
/// │     • `help` stops here, no store needed                                │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • TALLY_* env > tally.toml > defaults                               │
/// │                                                                         │
/// │  3. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • RUST_LOG wins over the configured filter                          │
/// │                                                                         │
/// │  4. Open Store ───────────────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │     • Shop state loaded (seed data for never-saved collections)         │
/// │                                                                         │
/// │  5. Execute Command ──────────────────────────────────────────────────► │
/// │     • Dirty collections saved before returning                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(args: &[String]) -> ConsoleResult<String> {
    let invocation = commands::parse(args)?;
    if invocation.command.is_offline() {
        return Ok(commands::USAGE.to_string());
    }

    let config = ConsoleConfig::load(invocation.config_path.as_deref())?;
    init_tracing(&config.log_filter);
    info!(store = %config.store_name, "Starting Tally console");

    let db_path = get_database_path(&config)?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    let mut state = AppState::open(db, config).await?;

    let result = commands::execute(invocation.command, &mut state).await;
    state.db().close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally=trace` - Show trace for tally crates only
/// - Default: `info,tally=debug,sqlx=warn` (or `log_filter` from config)
///
/// Logs go to stderr so command output stays pipeable.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.tally.tally/tally.db`
/// - **Windows**: `%APPDATA%\tally\tally\data\tally.db`
/// - **Linux**: `~/.local/share/tally/tally.db`
///
/// ## Override
/// `database_path` in the config, or the `TALLY_DB_PATH` environment variable.
pub fn get_database_path(config: &ConsoleConfig) -> ConsoleResult<PathBuf> {
    if let Some(path) = &config.database_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "tally", "tally")
        .ok_or_else(|| ConsoleError::Config("Could not determine app data directory".into()))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("tally.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_help_runs_without_store() {
        let output = run(&["help".to_string()]).await.unwrap();
        assert!(output.contains("Usage: tally"));
    }

    #[tokio::test]
    async fn test_usage_error_before_store() {
        let err = run(&["refund".to_string()]).await.unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_configured_database_path_wins() {
        let config = ConsoleConfig {
            database_path: Some(PathBuf::from("/tmp/shop.db")),
            ..ConsoleConfig::default()
        };
        assert_eq!(get_database_path(&config).unwrap(), PathBuf::from("/tmp/shop.db"));
    }
}
