//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Catalog/expense/user management failures       │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── BackupError      - Unparseable backup documents                   │
//! │                                                                         │
//! │  tally-db errors (separate crate)                                      │
//! │  └── DbError          - Persistence failures                           │
//! │                                                                         │
//! │  NOT errors: cart mutations that would break stock rules. Those are    │
//! │  ignored and reported through the `bool` each mutation returns.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Management operation errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A product with this id is already in the catalog.
    #[error("Product already exists: {0}")]
    DuplicateProduct(String),

    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User already exists: {0}")]
    DuplicateUser(String),

    /// The category list already contains this name.
    #[error("Category already exists: {0}")]
    DuplicateCategory(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., malformed SKU or PIN).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., duplicate PIN).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Backup Error
// =============================================================================

/// Failure to read a backup document.
///
/// The only failure the import boundary surfaces. A document that fails
/// here is never partially applied.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Invalid backup format: {0}")]
    InvalidFormat(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

pub type BackupResult<T> = Result<T, BackupError>;

// =============================================================================
// Unit Tests
// =============================================================================
