//! # Console Error Type
//!
//! Unified error type for console commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tally Console                          │
//! │                                                                         │
//! │  tally import backup.json --pin 1234                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  ConsoleResult<T>                                                │  │
//! │  │         │                                                        │  │
//! │  │  Store error?   ─── DbError::QueryFailed("...") ──────┐         │  │
//! │  │  Bad backup?    ─── BackupError::InvalidFormat ───────┤         │  │
//! │  │  Wrong PIN?     ─── ConsoleError::InvalidPin ─────────┼──► exit │  │
//! │  │  Bad arguments? ─── ConsoleError::Usage ──────────────┘   code  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: "error: Invalid PIN"                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tally_core::{BackupError, CoreError, Permission};
use tally_db::DbError;
use thiserror::Error;

/// Errors surfaced to the operator.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Unknown command, missing argument or malformed value.
    #[error("{0}")]
    Usage(String),

    #[error("Invalid PIN")]
    InvalidPin,

    #[error("{user} may not open {permission:?}")]
    PermissionDenied { user: String, permission: Permission },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Backup error: {0}")]
    Backup(#[from] BackupError),

    #[error("Store error: {0}")]
    Db(#[from] DbError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ConsoleError {
    pub fn usage(message: impl Into<String>) -> Self {
        ConsoleError::Usage(message.into())
    }

    /// Process exit code for this error.
    ///
    /// | Code | Meaning                  |
    /// |------|--------------------------|
    /// | 2    | Bad command line         |
    /// | 3    | Login or permission      |
    /// | 4    | Rejected by the shop     |
    /// | 5    | Store or file failure    |
    pub fn exit_code(&self) -> i32 {
        match self {
            ConsoleError::Usage(_) | ConsoleError::Config(_) => 2,
            ConsoleError::InvalidPin | ConsoleError::PermissionDenied { .. } => 3,
            ConsoleError::Core(_) | ConsoleError::Backup(_) => 4,
            ConsoleError::Db(_) | ConsoleError::Io(_) | ConsoleError::Serialization(_) => 5,
        }
    }
}

impl From<toml::de::Error> for ConsoleError {
    fn from(err: toml::de::Error) -> Self {
        ConsoleError::Config(err.to_string())
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
