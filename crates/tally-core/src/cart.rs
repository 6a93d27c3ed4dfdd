//! # Cart Engine
//!
//! Owns the in-progress sale: line items, line discounts and the cart-level
//! discount.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Cashier Action           Operation               Cart State Change     │
//! │  ──────────────           ─────────               ─────────────────     │
//! │                                                                         │
//! │  Tap product / scan ─────► add_item() ──────────► qty + 1 or new line  │
//! │                                                                         │
//! │  + / - buttons ──────────► adjust_quantity() ───► qty ± n (0 removes)  │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_item() ───────► line removed         │
//! │                                                                         │
//! │  Tag icon ───────────────► set_line_discount() ─► line discount        │
//! │                                                                         │
//! │  Cart discount ──────────► set_cart_discount() ─► cart discount        │
//! │                                                                         │
//! │  After checkout ─────────► clear() ─────────────► empty                │
//! │                                                                         │
//! │  NOTE: A mutation that would push a line past the product's stock is   │
//! │        ignored. Every mutation returns `true` only if state changed.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::money::Money;
use crate::pricing::apply_discount;
use crate::types::{Discount, Product};

/// A line in the cart.
///
/// ## Design Notes
/// - `product`: snapshot of the catalog entry, refreshed on every
///   `add_item`. Its `quantity` is the stock ceiling for this line.
/// - Serializes flat (product fields + `cartQuantity` + `discount`), the
///   shape the UI renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,

    /// Units of this product in the cart. Always within `1..=product.quantity`.
    pub cart_quantity: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
}

impl CartLine {
    fn new(product: &Product) -> Self {
        CartLine {
            product: product.clone(),
            cart_quantity: 1,
            discount: None,
        }
    }

    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Price × quantity before the line discount.
    #[inline]
    pub fn gross_total(&self) -> Money {
        self.product.selling_price.multiply_quantity(self.cart_quantity)
    }

    /// Price × quantity after the line discount.
    #[inline]
    pub fn line_total(&self) -> Money {
        apply_discount(self.gross_total(), self.discount.as_ref())
    }
}

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of discounted line totals.
    pub subtotal: Money,
    /// What the cart-level discount removes from `subtotal`.
    pub discount_amount: Money,
    pub total: Money,
}

/// The in-progress sale.
///
/// ## Invariants
/// - Lines are unique by product id, in insertion order
/// - `1 <= cart_quantity <= product.quantity` for every line
/// - The cart discount applies once, to the summed line totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    cart_discount: Option<Discount>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product.id == product_id)
    }

    pub fn cart_discount(&self) -> Option<&Discount> {
        self.cart_discount.as_ref()
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Out of stock: ignored
    /// - Already in cart at full stock: ignored
    /// - Already in cart: quantity + 1 (snapshot refreshed)
    /// - Not in cart: new line with quantity 1
    pub fn add_item(&mut self, product: &Product) -> bool {
        if product.quantity <= 0 {
            debug!(product_id = %product.id, "add_item ignored: out of stock");
            return false;
        }

        if let Some(line) = self.line_mut(&product.id) {
            if line.cart_quantity >= product.quantity {
                debug!(
                    product_id = %product.id,
                    stock = product.quantity,
                    "add_item ignored: cart already holds all stock"
                );
                return false;
            }
            line.product = product.clone();
            line.cart_quantity += 1;
            return true;
        }

        self.lines.push(CartLine::new(product));
        true
    }

    /// Scans a barcode against the catalog and adds the exact match.
    ///
    /// Empty codes never match (products without a barcode store `""`).
    pub fn add_by_barcode(&mut self, catalog: &[Product], barcode: &str) -> bool {
        if barcode.is_empty() {
            return false;
        }
        match catalog.iter().find(|p| p.barcode == barcode) {
            Some(product) => self.add_item(product),
            None => {
                debug!(barcode = %barcode, "no product with this barcode");
                false
            }
        }
    }

    /// Removes a line regardless of its quantity.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product.id != product_id);
        self.lines.len() != before
    }

    /// Changes a line's quantity by `delta`.
    ///
    /// ## Behavior
    /// - Result above the product's stock (or past `i64::MAX`): ignored
    /// - Result zero or below: line removed
    /// - Zero delta or product not in cart: ignored
    pub fn adjust_quantity(&mut self, product_id: &str, delta: i64) -> bool {
        if delta == 0 {
            return false;
        }
        let Some(line) = self.line_mut(product_id) else {
            return false;
        };

        // Overflow only happens upward, since cart_quantity is always positive.
        let Some(new_qty) = line.cart_quantity.checked_add(delta) else {
            debug!(product_id = %product_id, delta, "adjust_quantity ignored: exceeds stock");
            return false;
        };
        if new_qty <= 0 {
            return self.remove_item(product_id);
        }
        if new_qty > line.product.quantity {
            debug!(
                product_id = %product_id,
                requested = new_qty,
                stock = line.product.quantity,
                "adjust_quantity ignored: exceeds stock"
            );
            return false;
        }
        line.cart_quantity = new_qty;
        true
    }

    /// Replaces (or clears, with `None`) a line's discount.
    pub fn set_line_discount(&mut self, product_id: &str, discount: Option<Discount>) -> bool {
        match self.line_mut(product_id) {
            Some(line) => {
                line.discount = discount;
                true
            }
            None => false,
        }
    }

    /// Sets or clears the cart-level discount.
    pub fn set_cart_discount(&mut self, discount: Option<Discount>) {
        self.cart_discount = discount;
    }

    /// Discounted total of a single line.
    #[inline]
    pub fn line_total(line: &CartLine) -> Money {
        line.line_total()
    }

    /// Computes subtotal, cart discount and total.
    ///
    /// ```text
    /// subtotal        = Σ line_total(line)
    /// total           = apply_discount(subtotal, cart_discount)
    /// discount_amount = subtotal - total
    /// ```
    pub fn totals(&self) -> CartTotals {
        let subtotal: Money = self.lines.iter().map(CartLine::line_total).sum();
        let total = apply_discount(subtotal, self.cart_discount.as_ref());
        CartTotals {
            subtotal,
            discount_amount: subtotal - total,
            total,
        }
    }

    /// Empties lines and the cart discount.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.cart_discount = None;
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.cart_quantity).sum()
    }
}

/// Filters the catalog the way the POS search box does.
///
/// Matches a case-insensitive substring of name or SKU, or a plain substring
/// of the barcode. `category = None` means all categories.
pub fn search_products<'a>(
    catalog: &'a [Product],
    query: &str,
    category: Option<&str>,
) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    catalog
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.sku.to_lowercase().contains(&needle)
                || p.barcode.contains(query.trim())
        })
        .filter(|p| category.map_or(true, |c| p.category == c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::sample_products;
    use proptest::prelude::*;

    fn test_product(id: &str, price: f64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            category: "Other".to_string(),
            brand: None,
            barcode: format!("BC-{}", id),
            sku: format!("SKU-{}", id),
            buying_price: Money::new(price / 2.0),
            selling_price: Money::new(price),
            quantity: stock,
            min_stock_level: 1,
            supplier: None,
            image_url: None,
        }
    }

    fn approx(a: Money, b: f64) -> bool {
        (a.amount() - b).abs() < 1e-9
    }

    #[test]
    fn test_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 10.0, 5);

        assert!(cart.add_item(&product));
        assert!(cart.add_item(&product));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert!(approx(cart.totals().subtotal, 20.0));
    }

    #[test]
    fn test_add_out_of_stock_is_ignored() {
        let mut cart = Cart::new();
        assert!(!cart.add_item(&test_product("1", 10.0, 0)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_stops_at_stock() {
        let mut cart = Cart::new();
        let product = test_product("1", 10.0, 2);

        assert!(cart.add_item(&product));
        assert!(cart.add_item(&product));
        assert!(!cart.add_item(&product));
        assert_eq!(cart.line("1").unwrap().cart_quantity, 2);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("b", 1.0, 3));
        cart.add_item(&test_product("a", 1.0, 3));
        cart.add_item(&test_product("b", 1.0, 3));

        let ids: Vec<&str> = cart.lines().iter().map(CartLine::product_id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_adjust_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 10.0, 3);
        cart.add_item(&product);

        assert!(cart.adjust_quantity("1", 2));
        assert_eq!(cart.line("1").unwrap().cart_quantity, 3);

        // Past stock: ignored.
        assert!(!cart.adjust_quantity("1", 1));
        assert_eq!(cart.line("1").unwrap().cart_quantity, 3);

        // Unknown product: ignored.
        assert!(!cart.adjust_quantity("nope", 1));
    }

    #[test]
    fn test_adjust_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 10.0, 3));

        assert!(cart.adjust_quantity("1", -1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_adjust_extreme_deltas() {
        let mut cart = Cart::new();
        let product = test_product("1", 10.0, 5);
        cart.add_item(&product);
        cart.add_item(&product);

        // Overflowing add counts as past stock.
        assert!(!cart.adjust_quantity("1", i64::MAX));
        assert_eq!(cart.line("1").unwrap().cart_quantity, 2);

        assert!(!cart.adjust_quantity("1", 0));
        assert_eq!(cart.line("1").unwrap().cart_quantity, 2);

        assert!(cart.adjust_quantity("1", i64::MIN));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        let product = test_product("1", 10.0, 5);
        cart.add_item(&product);
        cart.add_item(&product);

        assert!(cart.remove_item("1"));
        assert!(!cart.remove_item("1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_line_and_cart_discounts() {
        let mut cart = Cart::new();
        let product = test_product("1", 100.0, 5);
        cart.add_item(&product);
        cart.add_item(&product);

        assert!(cart.set_line_discount("1", Some(Discount::Fixed(Money::new(20.0)))));
        cart.set_cart_discount(Some(Discount::Percentage(10.0)));

        let line = cart.line("1").unwrap();
        assert!(approx(Cart::line_total(line), 180.0));

        let totals = cart.totals();
        assert!(approx(totals.subtotal, 180.0));
        assert!(approx(totals.total, 162.0));
        assert!(approx(totals.discount_amount, 18.0));
    }

    #[test]
    fn test_fixed_cart_discount_amount_is_capped_by_subtotal() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 30.0, 5));
        cart.set_cart_discount(Some(Discount::Fixed(Money::new(50.0))));

        let totals = cart.totals();
        assert_eq!(totals.total, Money::zero());
        assert!(approx(totals.discount_amount, 30.0));
    }

    #[test]
    fn test_set_discount_on_missing_line() {
        let mut cart = Cart::new();
        assert!(!cart.set_line_discount("1", Some(Discount::Percentage(5.0))));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.clear();
        assert!(cart.is_empty());

        cart.add_item(&test_product("1", 10.0, 5));
        cart.set_cart_discount(Some(Discount::Percentage(5.0)));
        cart.clear();
        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.cart_discount().is_none());
        assert_eq!(cart.totals().total, Money::zero());
    }

    #[test]
    fn test_add_by_barcode() {
        let catalog = sample_products();
        let mut cart = Cart::new();

        assert!(cart.add_by_barcode(&catalog, "88002"));
        assert_eq!(cart.line("p2").unwrap().cart_quantity, 1);

        // The hat has an empty barcode; an empty scan must not match it.
        assert!(!cart.add_by_barcode(&catalog, ""));
        assert!(!cart.add_by_barcode(&catalog, "99999"));
    }

    #[test]
    fn test_search_products() {
        let catalog = sample_products();

        let hits = search_products(&catalog, "usb", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p2");

        let hits = search_products(&catalog, "el-00", None);
        assert_eq!(hits.len(), 2);

        let hits = search_products(&catalog, "", Some("Electronics"));
        assert_eq!(hits.len(), 2);

        let hits = search_products(&catalog, "8800", Some("Hats"));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_cart_line_serializes_flat() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 10.0, 5));
        let value = serde_json::to_value(cart.line("1").unwrap()).unwrap();
        assert_eq!(value["id"], "1");
        assert_eq!(value["cartQuantity"], 1);
        assert_eq!(value["sellingPrice"], 10.0);
    }

    proptest! {
        #[test]
        fn repeated_adds_never_exceed_stock(stock in 0i64..20, adds in 0usize..40) {
            let mut cart = Cart::new();
            let product = test_product("1", 5.0, stock);
            for _ in 0..adds {
                cart.add_item(&product);
                if let Some(line) = cart.line("1") {
                    prop_assert!(line.cart_quantity <= product.quantity);
                }
            }
            let held = cart.line("1").map_or(0, |l| l.cart_quantity);
            prop_assert_eq!(held, (adds as i64).min(stock));
        }

        #[test]
        fn adjustments_keep_quantity_in_bounds(
            stock in 1i64..20,
            deltas in proptest::collection::vec(
                prop_oneof![-5i64..5, Just(i64::MAX), Just(i64::MIN), any::<i64>()],
                0..30,
            ),
        ) {
            let mut cart = Cart::new();
            let product = test_product("1", 5.0, stock);
            cart.add_item(&product);
            for delta in deltas {
                cart.adjust_quantity("1", delta);
                if let Some(line) = cart.line("1") {
                    prop_assert!(line.cart_quantity >= 1);
                    prop_assert!(line.cart_quantity <= stock);
                }
            }
        }
    }
}
