//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    Expense      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id, date       │   │  id, date       │       │
//! │  │  sku, barcode   │   │  items[]  ──────┼──►│  amount         │       │
//! │  │  buyingPrice    │   │  subtotal       │   │  category       │       │
//! │  │  sellingPrice   │   │  totalAmount    │   └─────────────────┘       │
//! │  │  quantity       │   │  paymentMethod  │                              │
//! │  └─────────────────┘   └────────┬────────┘                              │
//! │                                 │                                        │
//! │                        ┌────────▼────────┐   ┌─────────────────┐       │
//! │                        │    SaleItem     │   │    Discount     │       │
//! │                        │  (snapshot of   │   │  PERCENTAGE(p)  │       │
//! │                        │   the product)  │   │  FIXED(amount)  │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │      User       │   │  ActivityLog    │                              │
//! │  │  role, pin      │   │  action, actor  │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Every type serializes with camelCase keys. The persisted collections and
//! backup files use exactly these shapes, so field names must not change.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog entry.
///
/// `quantity` is the only field the core mutates (decremented on commit).
/// The `quantity >= 0` invariant is enforced by the cart engine, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub brand: Option<String>,
    pub barcode: String,
    pub sku: String,
    /// Cost price.
    pub buying_price: Money,
    /// Shelf price.
    pub selling_price: Money,
    /// Stock on hand.
    pub quantity: i64,
    /// Reorder threshold.
    pub min_stock_level: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image_url: Option<String>,
}

impl Product {
    /// At or below the reorder threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock_level
    }

    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity <= 0
    }

    /// Inventory valuation at cost: `buyingPrice × quantity`.
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.buying_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Discount
// =============================================================================

/// A line-level or cart-level discount.
///
/// Serialized as `{"type": "PERCENTAGE", "value": 10}` or
/// `{"type": "FIXED", "value": 20}`. "No discount" is `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Discount {
    /// Percent off, nominally 0-100.
    Percentage(f64),
    /// Currency amount off.
    Fixed(Money),
}

impl Discount {
    /// Short label for receipts and audit text: `10%` or `$5.00`.
    pub fn describe(&self) -> String {
        match self {
            Discount::Percentage(pct) => format!("{}%", pct),
            Discount::Fixed(amount) => amount.to_string(),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// Tender type used to settle a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum PaymentMethod {
    /// Physical cash.
    Cash,
    /// Zaad mobile money.
    Zaad,
    /// eDahab mobile money.
    Edahab,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Zaad => "ZAAD",
            PaymentMethod::Edahab => "EDAHAB",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CASH" => Ok(PaymentMethod::Cash),
            "ZAAD" => Ok(PaymentMethod::Zaad),
            "EDAHAB" => Ok(PaymentMethod::Edahab),
            _ => Err(ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: vec!["CASH".into(), "ZAAD".into(), "EDAHAB".into()],
            }),
        }
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleItem {
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub name: String,
    pub quantity: i64,
    /// Selling price at time of sale (frozen).
    pub unit_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub discount: Option<Discount>,
    /// Final line amount after the line discount.
    pub subtotal: Money,
}

// =============================================================================
// Sale
// =============================================================================

/// An immutable, committed sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    pub id: String,
    /// Instant of commit.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub items: Vec<SaleItem>,
    /// Sum of line subtotals before the cart discount.
    pub subtotal: Money,
    /// Cart-level discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub discount: Option<Discount>,
    /// Amount charged.
    pub total_amount: Money,
    pub payment_method: PaymentMethod,
    pub cashier_id: String,
    pub cashier_name: String,
}

impl Sale {
    /// Amount removed by the cart-level discount.
    #[inline]
    pub fn discount_amount(&self) -> Money {
        self.subtotal - self.total_amount
    }

    /// Calendar day (UTC) the sale was committed on.
    #[inline]
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Last six characters of the id, as printed on receipts.
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }
}

/// Returns the last six characters of an id (or the whole id if shorter).
pub(crate) fn short_id(id: &str) -> &str {
    let start = id
        .char_indices()
        .rev()
        .nth(5)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    &id[start..]
}

// =============================================================================
// Expense
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: Money,
    /// Plain calendar date, no time component.
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub category: String,
}

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum UserRole {
    Admin,
    Employee,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub pin: String,
}

/// Snapshot of whoever performs a mutating operation.
///
/// Threaded explicitly through every mutating call so the core never reads
/// an ambient session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub name: String,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Actor {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Attribution used when no user is signed in.
    pub fn unknown() -> Self {
        Actor::new("unknown", "Unknown")
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Actor::new(user.id.clone(), user.name.clone())
    }
}

// =============================================================================
// Activity Log
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ActivityAction {
    Login,
    Logout,
    Sale,
    InventoryAdd,
    InventoryUpdate,
    InventoryDelete,
    ExpenseAdd,
    ExpenseDelete,
    UserUpdate,
    UserDelete,
    DataRestore,
}

impl ActivityAction {
    /// Wire name, e.g. `INVENTORY_ADD`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Login => "LOGIN",
            ActivityAction::Logout => "LOGOUT",
            ActivityAction::Sale => "SALE",
            ActivityAction::InventoryAdd => "INVENTORY_ADD",
            ActivityAction::InventoryUpdate => "INVENTORY_UPDATE",
            ActivityAction::InventoryDelete => "INVENTORY_DELETE",
            ActivityAction::ExpenseAdd => "EXPENSE_ADD",
            ActivityAction::ExpenseDelete => "EXPENSE_DELETE",
            ActivityAction::UserUpdate => "USER_UPDATE",
            ActivityAction::UserDelete => "USER_DELETE",
            ActivityAction::DataRestore => "DATA_RESTORE",
        }
    }
}

/// An audit entry. Append-only, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ActivityLog {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub action: ActivityAction,
    pub details: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

impl ActivityLog {
    pub fn new(
        id: String,
        actor: &Actor,
        action: ActivityAction,
        details: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        ActivityLog {
            id,
            user_id: actor.id.clone(),
            user_name: actor.name.clone(),
            action,
            details: details.into(),
            timestamp,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
