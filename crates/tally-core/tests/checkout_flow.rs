//! End-to-end: ring up sales, then report on them.

use chrono::{NaiveDate, TimeZone, Utc};
use tally_core::backup::parse_backup;
use tally_core::ports::{FixedClock, SequentialIdGenerator};
use tally_core::{
    build_dashboard, build_report, Actor, Cart, Discount, Expense, Money, PaymentMethod, Shop,
    ShopState,
};

fn shop_at(y: i32, m: u32, d: u32) -> Shop {
    Shop::with_ports(
        ShopState::with_defaults(),
        Box::new(FixedClock(Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap())),
        Box::new(SequentialIdGenerator::new("t")),
    )
}

fn cashier() -> Actor {
    Actor::new("u2", "Cashier Ali")
}

#[test]
fn committing_three_units_leaves_seven_in_stock() {
    let mut state = ShopState::with_defaults();
    state.products[0].quantity = 10;
    let mut shop = Shop::with_ports(
        state,
        Box::new(FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap())),
        Box::new(SequentialIdGenerator::new("t")),
    );
    let p1 = shop.state().product("p1").unwrap().clone();

    let mut cart = Cart::new();
    for _ in 0..3 {
        assert!(cart.add_item(&p1));
    }
    let sale = shop.checkout(&mut cart, PaymentMethod::Cash, &cashier()).unwrap();

    assert_eq!(shop.state().product("p1").unwrap().quantity, 7);
    assert_eq!(sale.items.len(), 1);
    assert_eq!(sale.items[0].quantity, 3);
    assert_eq!(sale.items[0].unit_price, p1.selling_price);
}

#[test]
fn discounted_sale_flows_into_report() {
    let mut shop = shop_at(2024, 3, 15);
    let mut cart = Cart::new();
    let headphones = shop.state().product("p1").unwrap().clone();
    cart.add_item(&headphones);
    cart.add_item(&headphones);
    cart.set_line_discount("p1", Some(Discount::Fixed(Money::new(20.0))));
    cart.set_cart_discount(Some(Discount::Percentage(10.0)));

    let sale = shop.checkout(&mut cart, PaymentMethod::Zaad, &cashier()).unwrap();
    assert_eq!(sale.subtotal, Money::new(220.0));

    let expense = Expense {
        id: "e1".into(),
        description: "Electricity".into(),
        amount: Money::new(12.0),
        date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        category: "Utilities".into(),
    };
    shop.add_expense(&Actor::new("u1", "Admin User"), expense).unwrap();

    let state = shop.state();
    let report = build_report(
        &state.sales,
        &state.expenses,
        &state.products,
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    );

    assert_eq!(report.financials.revenue, Money::new(198.0));
    assert_eq!(report.financials.discounts, Money::new(22.0));
    assert_eq!(report.financials.cogs, Money::new(160.0));
    assert_eq!(report.financials.net_profit, Money::new(26.0));
    assert_eq!(report.fast_moving[0].product_id, "p1");
    assert_eq!(report.fast_moving[0].qty_sold, 2);
    assert_eq!(report.history.len(), 2);

    let now = Utc.with_ymd_and_hms(2024, 3, 15, 20, 0, 0).unwrap();
    let dashboard = build_dashboard(&state.sales, &state.expenses, &state.products, now);
    assert_eq!(dashboard.revenue, Money::new(198.0));
    // The expense is older than the rolling week.
    assert!(dashboard.expenses.is_zero());
}

#[test]
fn sold_then_deleted_product_stays_in_fast_movers() {
    let mut shop = shop_at(2024, 3, 15);
    let cable = shop.state().product("p2").unwrap().clone();
    let mut cart = Cart::new();
    for _ in 0..5 {
        cart.add_item(&cable);
    }
    shop.checkout(&mut cart, PaymentMethod::Cash, &cashier()).unwrap();
    shop.delete_product(&Actor::new("u1", "Admin User"), "p2");

    let state = shop.state();
    let report = build_report(
        &state.sales,
        &state.expenses,
        &state.products,
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    );

    assert_eq!(report.fast_moving.len(), 1);
    assert_eq!(report.fast_moving[0].name, "USB-C Cable");
    assert_eq!(report.fast_moving[0].qty_sold, 5);
    assert!(report.slow_moving.iter().all(|v| v.product_id != "p2"));
    assert!(report.financials.cogs.is_zero());
}

#[test]
fn export_then_import_reproduces_state() {
    let mut shop = shop_at(2024, 3, 15);
    let mut cart = Cart::new();
    cart.add_item(&shop.state().product("p3").unwrap().clone());
    shop.checkout(&mut cart, PaymentMethod::Edahab, &cashier()).unwrap();
    shop.login("1234").unwrap();

    let text = shop.export_json().unwrap();
    let mut restored = ShopState::default();
    parse_backup(&text).unwrap().apply(&mut restored);

    assert_eq!(&restored, shop.state());
}
