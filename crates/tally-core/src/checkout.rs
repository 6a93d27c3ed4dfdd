//! # Sale Commit Pipeline
//!
//! Turns a finalized cart into an immutable [`Sale`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    commit(cart, method, actor, ctx)                     │
//! │                                                                         │
//! │  1. Snapshot every line ────────► SaleItem { unitPrice, subtotal }      │
//! │  2. Assemble Sale ──────────────► fresh id, clock.now()                 │
//! │  3. Decrement stock by id ──────► missing products are skipped          │
//! │  4. Append to sale ledger ──────► newest first                          │
//! │  5. Record one audit entry ─────► ActivityAction::Sale                  │
//! │                                                                         │
//! │  Stock is NOT re-validated here. The cart engine already kept every    │
//! │  line within stock when it was built.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info, warn};

use crate::cart::{Cart, CartLine};
use crate::ports::{ActivitySink, Catalog, Clock, IdGenerator, SaleLedger};
use crate::types::{ActivityAction, ActivityLog, Actor, PaymentMethod, Sale, SaleItem};

/// Collaborators the commit reads from and writes to.
pub struct CommitContext<'a> {
    pub clock: &'a dyn Clock,
    pub ids: &'a dyn IdGenerator,
    pub catalog: &'a mut dyn Catalog,
    pub sales: &'a mut dyn SaleLedger,
    pub activity: &'a mut dyn ActivitySink,
}

fn sale_item(line: &CartLine) -> SaleItem {
    SaleItem {
        product_id: line.product.id.clone(),
        name: line.product.name.clone(),
        quantity: line.cart_quantity,
        unit_price: line.product.selling_price,
        discount: line.discount,
        subtotal: line.line_total(),
    }
}

/// Audit text for a committed sale.
///
/// `Processed Sale #800123 - Total: $162.00 (Discount: $18.00) - Items: 1 - Via CASH`
pub fn sale_details(sale: &Sale) -> String {
    let discount = sale.discount_amount();
    let discount_note = if discount.is_positive() {
        format!(" (Discount: {})", discount)
    } else {
        String::new()
    };
    format!(
        "Processed Sale #{} - Total: {}{} - Items: {} - Via {}",
        sale.short_id(),
        sale.total_amount,
        discount_note,
        sale.items.len(),
        sale.payment_method,
    )
}

/// Commits the cart. Returns `None` for an empty cart, with no side effects.
///
/// The cart itself is left untouched; clearing it is the caller's job once
/// the sale has been recorded.
pub fn commit(
    cart: &Cart,
    payment_method: PaymentMethod,
    actor: &Actor,
    ctx: CommitContext<'_>,
) -> Option<Sale> {
    if cart.is_empty() {
        debug!("commit ignored: cart is empty");
        return None;
    }

    let totals = cart.totals();
    let sale = Sale {
        id: ctx.ids.next_id(),
        date: ctx.clock.now(),
        items: cart.lines().iter().map(sale_item).collect(),
        subtotal: totals.subtotal,
        discount: cart.cart_discount().copied(),
        total_amount: totals.total,
        payment_method,
        cashier_id: actor.id.clone(),
        cashier_name: actor.name.clone(),
    };

    for item in &sale.items {
        if !ctx.catalog.decrement_stock(&item.product_id, item.quantity) {
            warn!(
                sale_id = %sale.id,
                product_id = %item.product_id,
                "product no longer in catalog, stock not decremented"
            );
        }
    }

    let entry = ActivityLog::new(
        ctx.ids.next_id(),
        actor,
        ActivityAction::Sale,
        sale_details(&sale),
        sale.date,
    );

    info!(
        sale_id = %sale.id,
        total = %sale.total_amount,
        items = sale.items.len(),
        method = %sale.payment_method,
        "Sale committed"
    );

    ctx.sales.append(sale.clone());
    ctx.activity.record(entry);

    Some(sale)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::sample_products;
    use crate::money::Money;
    use crate::ports::{FixedClock, SequentialIdGenerator};
    use crate::types::{Discount, Product};
    use chrono::{TimeZone, Utc};

    struct Fixture {
        products: Vec<Product>,
        sales: Vec<Sale>,
        logs: Vec<ActivityLog>,
        clock: FixedClock,
        ids: SequentialIdGenerator,
    }

    impl Fixture {
        fn new() -> Self {
            Fixture {
                products: sample_products(),
                sales: Vec::new(),
                logs: Vec::new(),
                clock: FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()),
                ids: SequentialIdGenerator::new("id"),
            }
        }

        fn commit(&mut self, cart: &Cart, method: PaymentMethod) -> Option<Sale> {
            let actor = Actor::new("u2", "Cashier Ali");
            commit(
                cart,
                method,
                &actor,
                CommitContext {
                    clock: &self.clock,
                    ids: &self.ids,
                    catalog: &mut self.products,
                    sales: &mut self.sales,
                    activity: &mut self.logs,
                },
            )
        }

        fn product(&self, id: &str) -> &Product {
            self.products.iter().find(|p| p.id == id).unwrap()
        }
    }

    #[test]
    fn test_commit_decrements_stock_and_snapshots_price() {
        let mut fx = Fixture::new();
        fx.products[0].quantity = 10;
        let price = fx.product("p1").selling_price;

        let mut cart = Cart::new();
        for _ in 0..3 {
            cart.add_item(&fx.products[0].clone());
        }

        let sale = fx.commit(&cart, PaymentMethod::Cash).unwrap();

        assert_eq!(fx.product("p1").quantity, 7);
        assert_eq!(sale.items.len(), 1);
        assert_eq!(sale.items[0].quantity, 3);
        assert_eq!(sale.items[0].unit_price, price);
        assert_eq!(sale.cashier_name, "Cashier Ali");
        assert_eq!(fx.sales.len(), 1);
    }

    #[test]
    fn test_commit_empty_cart_is_noop() {
        let mut fx = Fixture::new();
        assert!(fx.commit(&Cart::new(), PaymentMethod::Cash).is_none());
        assert!(fx.sales.is_empty());
        assert!(fx.logs.is_empty());
    }

    #[test]
    fn test_commit_skips_deleted_product() {
        let mut fx = Fixture::new();
        let mut cart = Cart::new();
        cart.add_item(&fx.products[1].clone());
        fx.products.retain(|p| p.id != "p2");

        let sale = fx.commit(&cart, PaymentMethod::Zaad).unwrap();
        assert_eq!(sale.items[0].product_id, "p2");
        assert_eq!(fx.products.len(), 4);
    }

    #[test]
    fn test_commit_records_totals_and_audit_entry() {
        let mut fx = Fixture::new();
        let mut cart = Cart::new();
        let hat = fx.product("p4").clone();
        cart.add_item(&hat);
        cart.add_item(&hat);
        cart.set_line_discount("p4", Some(Discount::Fixed(Money::new(10.0))));
        cart.set_cart_discount(Some(Discount::Percentage(50.0)));

        let sale = fx.commit(&cart, PaymentMethod::Edahab).unwrap();

        assert_eq!(sale.items[0].subtotal, Money::new(60.0));
        assert_eq!(sale.subtotal, Money::new(60.0));
        assert_eq!(sale.total_amount, Money::new(30.0));
        assert_eq!(sale.id, "id-1");

        assert_eq!(fx.logs.len(), 1);
        assert_eq!(fx.logs[0].action, ActivityAction::Sale);
        assert_eq!(fx.logs[0].user_id, "u2");
        assert_eq!(
            fx.logs[0].details,
            "Processed Sale #id-1 - Total: $30.00 (Discount: $30.00) - Items: 1 - Via EDAHAB"
        );
    }

    #[test]
    fn test_sales_are_newest_first() {
        let mut fx = Fixture::new();
        let mut cart = Cart::new();
        cart.add_item(&fx.product("p2").clone());

        fx.commit(&cart, PaymentMethod::Cash);
        fx.commit(&cart, PaymentMethod::Cash);

        // Ids alternate between sale and audit entry.
        assert_eq!(fx.sales[0].id, "id-3");
        assert_eq!(fx.sales[1].id, "id-1");
    }

    #[test]
    fn test_details_without_discount() {
        let mut fx = Fixture::new();
        let mut cart = Cart::new();
        cart.add_item(&fx.product("p2").clone());
        let sale = fx.commit(&cart, PaymentMethod::Cash).unwrap();
        assert_eq!(
            sale_details(&sale),
            "Processed Sale #id-1 - Total: $15.00 - Items: 1 - Via CASH"
        );
    }
}
