//! # Seed Data Generator
//!
//! Populates a store with the demo catalog and a history of sales and
//! expenses, so reports and the dashboard have something to show.
//!
//! ## Usage
//! ```bash
//! # Seed 30 days of history (default)
//! cargo run -p tally-db --bin seed
//!
//! # Custom history length
//! cargo run -p tally-db --bin seed -- --days 90
//!
//! # Specify database path
//! cargo run -p tally-db --bin seed -- --db ./data/tally.db
//! ```
//!
//! Sales are rung up through the real cart and checkout path, one clock per
//! day, so stock levels and audit entries stay consistent.

use chrono::{Days, NaiveDate, Utc};
use std::env;
use tally_core::ports::{FixedClock, UuidIdGenerator};
use tally_core::{Actor, Cart, Discount, Expense, Money, PaymentMethod, Shop, ShopState};
use tally_db::{Database, DbConfig};

const METHODS: [PaymentMethod; 3] = [PaymentMethod::Cash, PaymentMethod::Zaad, PaymentMethod::Edahab];

/// Recurring costs: (description, category, amount, every N days)
const EXPENSES: &[(&str, &str, f64, u64)] = &[
    ("Shop rent", "Rent", 400.0, 30),
    ("Electricity", "Utilities", 35.0, 7),
    ("Cleaning supplies", "Supplies", 12.5, 10),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut days: u64 = 30;
    let mut db_path = String::from("./tally_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--days" | "-n" => {
                if i + 1 < args.len() {
                    days = args[i + 1].parse().unwrap_or(30);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Tally Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --days <N>     Days of sales history (default: 30)");
                println!("  -d, --db <PATH>    Database file path (default: ./tally_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Tally Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!("Days:     {}", days);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let repo = db.collections();
    if repo.is_initialized().await? {
        println!("⚠ Store already holds data");
        println!("  Skipping seed to avoid overwriting it.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut state = ShopState::with_defaults();
    // Deep stock so a long history never empties the shelves.
    for product in &mut state.products {
        product.quantity += 20 * days as i64;
    }

    let today = Utc::now().date_naive();
    let first_day = today.checked_sub_days(Days::new(days)).unwrap_or(today);
    let start = std::time::Instant::now();
    let mut sales = 0usize;

    for offset in 0..days {
        let Some(day) = first_day.checked_add_days(Days::new(offset)) else {
            break;
        };
        let (day_state, day_sales) = seed_day(state, day, offset as usize);
        state = day_state;
        sales += day_sales;
    }

    repo.save_state(&state).await?;

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} sales and {} expenses in {:?}", sales, state.expenses.len(), elapsed);
    println!("✓ Seed complete!");

    Ok(())
}

/// Rings up one day's sales and books any recurring expense due that day.
fn seed_day(state: ShopState, day: NaiveDate, seed: usize) -> (ShopState, usize) {
    let noon = day
        .and_hms_opt(12, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now);
    let mut shop = Shop::with_ports(state, Box::new(FixedClock(noon)), Box::new(UuidIdGenerator));

    let cashier = Actor::new("u2", "Cashier Ali");
    let admin = Actor::new("u1", "Admin User");
    let catalog = shop.state().products.clone();
    let mut rung_up = 0;

    for n in 0..(1 + seed % 4) {
        let mut cart = Cart::new();
        let pick = (seed * 7 + n * 3) % catalog.len();
        for _ in 0..(1 + (seed + n) % 3) {
            cart.add_item(&catalog[pick]);
        }
        if (seed + n) % 5 == 0 {
            cart.set_cart_discount(Some(Discount::Percentage(10.0)));
        }

        let method = METHODS[(seed + n) % METHODS.len()];
        if shop.checkout(&mut cart, method, &cashier).is_some() {
            rung_up += 1;
        }
    }

    for (idx, (description, category, amount, every)) in EXPENSES.iter().enumerate() {
        if (seed as u64) % every == 0 {
            let expense = Expense {
                id: format!("seed-{}-{}", day, idx),
                description: description.to_string(),
                amount: Money::new(*amount),
                date: day,
                category: category.to_string(),
            };
            if let Err(e) = shop.add_expense(&admin, expense) {
                eprintln!("Failed to add expense {}: {}", description, e);
            }
        }
    }

    (shop.into_state(), rung_up)
}
