//! # Validation Module
//!
//! Input validation for catalog, expense and user management.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Management operations (ShopState::add_product, add_expense, ...)      │
//! │  └── THIS MODULE: reject malformed entities with a ValidationError     │
//! │                                                                         │
//! │  Cart engine                                                           │
//! │  └── NOT validated here. Stock rules are enforced by ignoring the      │
//! │      mutation (see cart.rs)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{validate_pin, validate_sku};
//!
//! assert!(validate_sku("EL-001").is_ok());
//! assert!(validate_pin("12a4").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Expense, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_SKU_LEN: usize = 50;
const MAX_QUERY_LEN: usize = 100;
const PIN_LEN: usize = 4;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a required, bounded display name.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a search query and returns it trimmed.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// Validates a login PIN: exactly four ASCII digits.
pub fn validate_pin(pin: &str) -> ValidationResult<()> {
    if pin.len() != PIN_LEN || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "pin".to_string(),
            reason: format!("must be exactly {} digits", PIN_LEN),
        });
    }
    Ok(())
}

/// Validates a category name.
pub fn validate_category(name: &str) -> ValidationResult<()> {
    validate_name("category", name)
}

// =============================================================================
// Entity Validators
// =============================================================================

fn non_negative(field: &str, value: f64) -> ValidationResult<()> {
    if value.is_nan() || value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a product before it enters the catalog.
///
/// ## Rules
/// - `id` and `name` required
/// - `sku` well-formed
/// - `buyingPrice`, `sellingPrice`, `quantity`, `minStockLevel` >= 0
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }
    validate_name("name", &product.name)?;
    validate_sku(&product.sku)?;
    non_negative("buyingPrice", product.buying_price.amount())?;
    non_negative("sellingPrice", product.selling_price.amount())?;
    non_negative("quantity", product.quantity as f64)?;
    non_negative("minStockLevel", product.min_stock_level as f64)?;
    Ok(())
}

/// Validates an expense.
pub fn validate_expense(expense: &Expense) -> ValidationResult<()> {
    validate_name("description", &expense.description)?;
    non_negative("amount", expense.amount.amount())?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
