//! # Ports
//!
//! Narrow interfaces the core depends on instead of global state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Ports                                           │
//! │                                                                         │
//! │  Input                               Output                             │
//! │  ─────                               ──────                             │
//! │  Clock         now()                 ActivitySink   record(entry)       │
//! │  IdGenerator   next_id()                                                │
//! │  Catalog       products(), decrement_stock(id, qty)                     │
//! │  SaleLedger    sales(), append(sale)                                    │
//! │  ExpenseLedger expenses()                                               │
//! │                                                                         │
//! │  The in-memory collections in ShopState implement the data ports.      │
//! │  Tests swap in FixedClock and SequentialIdGenerator.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::Cell;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::types::{ActivityLog, Expense, Product, Sale};

// =============================================================================
// Clock
// =============================================================================

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// =============================================================================
// Id Generator
// =============================================================================

/// Produces ids unique within the process lifetime.
///
/// A collision is a correctness bug, not a handled error.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

/// UUID v4 ids. Globally unique without coordination.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// `prefix-1`, `prefix-2`, ... for deterministic tests.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: Cell<u64>,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIdGenerator {
            prefix: prefix.into(),
            next: Cell::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.next.get();
        self.next.set(n + 1);
        format!("{}-{}", self.prefix, n)
    }
}

// =============================================================================
// Data Ports
// =============================================================================

/// Read access to products plus the one mutation the core performs.
pub trait Catalog {
    fn products(&self) -> &[Product];

    fn find(&self, product_id: &str) -> Option<&Product> {
        self.products().iter().find(|p| p.id == product_id)
    }

    /// Decrements stock by id. Returns `false` if the product is gone.
    fn decrement_stock(&mut self, product_id: &str, qty: i64) -> bool;
}

/// Append-only sale history, newest first.
pub trait SaleLedger {
    fn sales(&self) -> &[Sale];
    fn append(&mut self, sale: Sale);
}

/// Expense history, newest first.
pub trait ExpenseLedger {
    fn expenses(&self) -> &[Expense];
}

/// Append-only audit trail, newest first.
pub trait ActivitySink {
    fn record(&mut self, entry: ActivityLog);
}

impl Catalog for Vec<Product> {
    fn products(&self) -> &[Product] {
        self
    }

    fn decrement_stock(&mut self, product_id: &str, qty: i64) -> bool {
        match self.iter_mut().find(|p| p.id == product_id) {
            Some(product) => {
                product.quantity -= qty;
                true
            }
            None => false,
        }
    }
}

impl SaleLedger for Vec<Sale> {
    fn sales(&self) -> &[Sale] {
        self
    }

    fn append(&mut self, sale: Sale) {
        self.insert(0, sale);
    }
}

impl ExpenseLedger for Vec<Expense> {
    fn expenses(&self) -> &[Expense] {
        self
    }
}

impl ActivitySink for Vec<ActivityLog> {
    fn record(&mut self, entry: ActivityLog) {
        self.insert(0, entry);
    }
}
