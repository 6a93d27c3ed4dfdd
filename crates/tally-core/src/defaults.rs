//! Seed data for a fresh installation.
//!
//! Loaded when the store has no saved collections yet, and by the
//! `seed` binary in tally-db.

use crate::money::Money;
use crate::types::{Product, User, UserRole};

/// Name printed on reports and receipts when no store name is configured.
pub const DEFAULT_STORE_NAME: &str = "Original Electronics";

/// Built-in accounts: one admin, one cashier.
pub fn default_users() -> Vec<User> {
    vec![
        User {
            id: "u1".to_string(),
            name: "Admin User".to_string(),
            role: UserRole::Admin,
            pin: "1234".to_string(),
        },
        User {
            id: "u2".to_string(),
            name: "Cashier Ali".to_string(),
            role: UserRole::Employee,
            pin: "0000".to_string(),
        },
    ]
}

pub fn default_categories() -> Vec<String> {
    ["Electronics", "Accessories", "Eyeglasses", "Hats", "Other"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    category: &str,
    brand: Option<&str>,
    barcode: &str,
    sku: &str,
    buying: f64,
    selling: f64,
    quantity: i64,
    min_stock: i64,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        brand: brand.map(String::from),
        barcode: barcode.to_string(),
        sku: sku.to_string(),
        buying_price: Money::new(buying),
        selling_price: Money::new(selling),
        quantity,
        min_stock_level: min_stock,
        supplier: None,
        image_url: None,
    }
}

/// Demo catalog.
pub fn sample_products() -> Vec<Product> {
    vec![
        product("p1", "Wireless Headphones", "Electronics", Some("Sony"), "88001", "EL-001", 80.0, 120.0, 15, 5),
        product("p2", "USB-C Cable", "Accessories", Some("Anker"), "88002", "AC-002", 5.0, 15.0, 50, 10),
        product("p3", "Aviator Sunglasses", "Eyeglasses", Some("RayBan"), "88003", "GL-003", 60.0, 150.0, 8, 3),
        product("p4", "Fedora Hat", "Hats", None, "", "HT-004", 10.0, 35.0, 12, 4),
        product("p5", "Smart Watch", "Electronics", Some("Samsung"), "88005", "EL-005", 150.0, 250.0, 2, 3),
    ]
}
