//! # Sale Command
//!
//! Rings up a sale from the command line.
//!
//! ## Flow
//! ```text
//! tally sell p1:2 88003 --pin 0000 --method zaad --discount 10%
//!       │
//!       ▼
//! resolve each ITEM (id, SKU or barcode) ──► Cart::add_item
//!       │                                    Cart::adjust_quantity (QTY > 1)
//!       ▼
//! Cart::set_cart_discount ──► Shop::checkout ──► persist(products, sales, logs)
//! ```
//!
//! The cart refuses anything the stock can't cover. Here that becomes an
//! error instead of a silent no-op, since the operator typed it.

use std::str::FromStr;
use tally_core::{Actor, Cart, CoreError, Dirty, Discount, Money, PaymentMethod, Permission, Product, Sale};
use tracing::info;

use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, ConsoleResult};
use crate::state::AppState;

/// One `ITEM[:QTY]` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRequest {
    pub code: String,
    pub quantity: i64,
}

impl FromStr for LineRequest {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (code, quantity) = match s.rsplit_once(':') {
            Some((code, qty)) => {
                let qty = qty
                    .parse::<i64>()
                    .map_err(|_| ConsoleError::usage(format!("Invalid quantity in {}", s)))?;
                (code, qty)
            }
            None => (s, 1),
        };

        if code.is_empty() {
            return Err(ConsoleError::usage(format!("Missing product in {}", s)));
        }
        if quantity < 1 {
            return Err(ConsoleError::usage(format!("Quantity must be at least 1 in {}", s)));
        }

        Ok(LineRequest {
            code: code.to_string(),
            quantity,
        })
    }
}

/// `10%` is a percentage, anything else a fixed amount.
pub fn parse_discount(s: &str) -> ConsoleResult<Discount> {
    let invalid = || ConsoleError::usage(format!("Invalid discount: {}", s));
    let discount = match s.strip_suffix('%') {
        Some(pct) => Discount::Percentage(pct.trim().parse().map_err(|_| invalid())?),
        None => Discount::Fixed(Money::new(s.trim().parse().map_err(|_| invalid())?)),
    };

    let value = match discount {
        Discount::Percentage(p) => p,
        Discount::Fixed(m) => m.amount(),
    };
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(discount)
}

fn resolve<'a>(catalog: &'a [Product], code: &str) -> Option<&'a Product> {
    catalog.iter().find(|p| {
        p.id == code || p.sku.eq_ignore_ascii_case(code) || (!p.barcode.is_empty() && p.barcode == code)
    })
}

/// Fills a cart, failing on the first line the stock can't cover.
pub fn build_cart(
    catalog: &[Product],
    lines: &[LineRequest],
    discount: Option<Discount>,
) -> ConsoleResult<Cart> {
    let mut cart = Cart::new();

    for line in lines {
        let product =
            resolve(catalog, &line.code).ok_or_else(|| CoreError::ProductNotFound(line.code.clone()))?;

        if !cart.add_item(product) {
            return Err(ConsoleError::usage(format!("{} is out of stock", product.name)));
        }
        if line.quantity > 1 && !cart.adjust_quantity(&product.id, line.quantity - 1) {
            return Err(ConsoleError::usage(format!(
                "Only {} {} in stock",
                product.quantity, product.name
            )));
        }
    }

    cart.set_cart_discount(discount);
    Ok(cart)
}

pub async fn run(
    state: &mut AppState,
    pin: &str,
    method: PaymentMethod,
    discount: Option<Discount>,
    lines: &[LineRequest],
) -> ConsoleResult<String> {
    let (user, mut dirty) = state.sign_in(pin, Permission::PointOfSale)?;
    let actor = Actor::from(&user);

    let result = build_cart(&state.shop().state().products, lines, discount);
    let output = match result {
        Ok(mut cart) => match state.shop_mut().checkout(&mut cart, method, &actor) {
            Some(sale) => {
                dirty |= Dirty::CHECKOUT;
                info!(sale_id = %sale.id, "Sale rung up from console");
                Ok(receipt(&sale, &state.config))
            }
            None => Err(ConsoleError::usage("Nothing to sell")),
        },
        Err(e) => Err(e),
    };

    // The session is recorded even when the sale is refused.
    dirty |= state.sign_out(&user);
    state.persist(dirty).await?;
    output
}

pub fn receipt(sale: &Sale, config: &ConsoleConfig) -> String {
    let money = |m| config.format_currency(m);
    let row = |label: &str, value: String| format!("{:<18}{:>14}", label, value);

    let mut lines = vec![
        config.store_name.clone(),
        format!("Sale #{}  {}", sale.short_id(), sale.date.format("%Y-%m-%d %H:%M")),
        format!("Cashier: {}", sale.cashier_name),
        String::new(),
    ];
    for item in &sale.items {
        lines.push(format!(
            "  {} x {:<26} @ {:>10} {:>12}",
            item.quantity,
            item.name,
            money(item.unit_price),
            money(item.subtotal)
        ));
        if let Some(discount) = &item.discount {
            lines.push(format!("      (discount {})", discount.describe()));
        }
    }
    lines.push(String::new());
    lines.push(row("Subtotal", money(sale.subtotal)));
    if let Some(discount) = &sale.discount {
        lines.push(row(
            &format!("Discount ({})", discount.describe()),
            money(sale.discount_amount()),
        ));
    }
    lines.push(row("Total", money(sale.total_amount)));
    lines.push(format!("Paid via {}", sale.payment_method));

    lines.join("\n")
}
