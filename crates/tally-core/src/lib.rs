//! # tally-core: Pure Business Logic for Tally
//!
//! Transaction and pricing engine plus reporting for a single shop. No
//! database, no file system, no network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/tally-console                              │   │
//! │  │    report, dashboard, export, import, seed                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   pricing ──► cart ──► checkout ──► reporting / dashboard      │   │
//! │  │                          │                                      │   │
//! │  │                 ports (Clock, IdGenerator, Catalog, ...)        │   │
//! │  │                          │                                      │   │
//! │  │   shop (ShopState + management ops)   backup   access          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-db (Persistence)                       │   │
//! │  │          SQLite key-value store, one document per collection    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Expense, User, ActivityLog)
//! - [`money`] - Money newtype over f64
//! - [`pricing`] - The discount primitive
//! - [`cart`] - Cart engine
//! - [`checkout`] - Sale commit pipeline
//! - [`reporting`] - Windowed financials, product velocity, CSV export
//! - [`dashboard`] - Rolling seven-day summary
//! - [`shop`] - In-memory state and management operations
//! - [`backup`] - JSON export and import
//! - [`access`] - PIN login and role permissions
//! - [`ports`] - Clock, id generator and collection interfaces
//! - [`error`] / [`validation`] - Typed errors and input rules
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{Cart, Discount, Money, PaymentMethod, Shop, ShopState, Actor};
//!
//! let mut shop = Shop::new(ShopState::with_defaults());
//! let headphones = shop.state().product("p1").unwrap().clone();
//!
//! let mut cart = Cart::new();
//! cart.add_item(&headphones);
//! cart.set_cart_discount(Some(Discount::Percentage(10.0)));
//!
//! let cashier = Actor::new("u2", "Cashier Ali");
//! let sale = shop.checkout(&mut cart, PaymentMethod::Cash, &cashier).unwrap();
//!
//! assert_eq!(sale.total_amount, Money::new(108.0));
//! assert_eq!(shop.state().product("p1").unwrap().quantity, 14);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod backup;
pub mod cart;
pub mod checkout;
pub mod dashboard;
pub mod defaults;
pub mod error;
pub mod money;
pub mod ports;
pub mod pricing;
pub mod reporting;
pub mod shop;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use access::{authenticate, Permission};
pub use backup::{parse_backup, BackupDocument};
pub use cart::{search_products, Cart, CartLine, CartTotals};
pub use dashboard::{build_dashboard, DashboardSummary};
pub use error::{BackupError, CoreError, ValidationError};
pub use money::Money;
pub use pricing::apply_discount;
pub use reporting::{build_report, ReportPeriod, ReportResult};
pub use shop::{Collection, Dirty, Shop, ShopState};
pub use types::*;
