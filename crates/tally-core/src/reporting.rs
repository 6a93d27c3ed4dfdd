//! # Reporting Aggregator
//!
//! Read-only analysis over sales, expenses and the current catalog for an
//! inclusive calendar-date window.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    build_report(start ..= end)                          │
//! │                                                                         │
//! │  sales ────┐                                                            │
//! │            ├─► window filter (calendar day) ──┬─► Financials            │
//! │  expenses ─┘                                  ├─► ProductVelocity       │
//! │                                               │     fast / slow movers  │
//! │  products ────────────────────────────────────┤─► low stock             │
//! │    (current buying price for COGS)            └─► combined history      │
//! │                                                                         │
//! │  Deleted products still count in revenue and fast movers under the     │
//! │  name snapshotted on the sale line. Their cost is treated as zero and  │
//! │  they never appear as slow movers.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Expense, PaymentMethod, Product, Sale};

/// How many products the fast and slow mover lists hold.
pub const VELOCITY_LIST_LEN: usize = 5;

// =============================================================================
// Report Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Financials {
    pub revenue: Money,
    /// Cart-level discounts given: Σ (subtotal - totalAmount).
    pub discounts: Money,
    /// Cost of goods sold at the CURRENT buying price.
    pub cogs: Money,
    pub gross_profit: Money,
    pub expenses: Money,
    pub net_profit: Money,
    pub transaction_count: usize,
}

/// Units sold and revenue for one product id.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductVelocity {
    pub product_id: String,
    pub name: String,
    pub qty_sold: i64,
    /// Σ line subtotals.
    pub revenue: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum HistoryKind {
    Sale,
    Expense,
}

/// One row of the combined sales + expenses history.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct HistoryEntry {
    pub id: String,
    pub kind: HistoryKind,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub detail: String,
    /// Positive for sales, negative for expenses.
    pub amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub method: Option<PaymentMethod>,
}

impl HistoryEntry {
    fn from_sale(sale: &Sale) -> Self {
        HistoryEntry {
            id: sale.id.clone(),
            kind: HistoryKind::Sale,
            timestamp: sale.date,
            description: format!("Sale #{} - {} items", sale.short_id(), sale.items.len()),
            detail: format!("Cashier: {}", sale.cashier_name),
            amount: sale.total_amount,
            method: Some(sale.payment_method),
        }
    }

    fn from_expense(expense: &Expense) -> Self {
        HistoryEntry {
            id: expense.id.clone(),
            kind: HistoryKind::Expense,
            timestamp: expense_instant(expense.date),
            description: expense.description.clone(),
            detail: format!("Category: {}", expense.category),
            amount: Money::zero() - expense.amount,
            method: None,
        }
    }
}

/// Expenses carry no time of day; they sort as midnight UTC.
fn expense_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Everything the reports screen shows for one window.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReportResult {
    #[ts(as = "String")]
    pub start: NaiveDate,
    #[ts(as = "String")]
    pub end: NaiveDate,
    /// In-window sales, in ledger order.
    pub sales: Vec<Sale>,
    /// In-window expenses, in ledger order.
    pub expenses: Vec<Expense>,
    pub financials: Financials,
    pub fast_moving: Vec<ProductVelocity>,
    pub slow_moving: Vec<ProductVelocity>,
    pub low_stock: Vec<Product>,
    /// Sales and expenses merged, newest first.
    pub history: Vec<HistoryEntry>,
}

// =============================================================================
// Report Periods
// =============================================================================

/// Window presets offered by the reports screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// Today only.
    Daily,
    /// First to last day of the current month.
    Monthly,
    /// January 1 to December 31 of the current year.
    Yearly,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl ReportPeriod {
    /// Resolves the preset to an inclusive `(start, end)` pair.
    pub fn range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match *self {
            ReportPeriod::Daily => (today, today),
            ReportPeriod::Monthly => {
                let first = today.with_day(1).unwrap_or(today);
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(today);
                (first, last)
            }
            ReportPeriod::Yearly => {
                let first = today.with_ordinal(1).unwrap_or(today);
                let last = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
                (first, last)
            }
            ReportPeriod::Custom { start, end } => (start, end),
        }
    }
}

// =============================================================================
// Aggregation
// =============================================================================

#[inline]
fn in_window(day: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    day >= start && day <= end
}

fn compute_financials(sales: &[Sale], expenses: &[Expense], products: &[Product]) -> Financials {
    let revenue: Money = sales.iter().map(|s| s.total_amount).sum();
    let discounts: Money = sales.iter().map(Sale::discount_amount).sum();
    let cogs = cost_of_goods(sales, products);
    let gross_profit = revenue - cogs;
    let expenses_total: Money = expenses.iter().map(|e| e.amount).sum();

    Financials {
        revenue,
        discounts,
        cogs,
        gross_profit,
        expenses: expenses_total,
        net_profit: gross_profit - expenses_total,
        transaction_count: sales.len(),
    }
}

/// COGS at the current catalog buying price. Deleted products cost nothing.
pub(crate) fn cost_of_goods(sales: &[Sale], products: &[Product]) -> Money {
    let buying: HashMap<&str, Money> = products
        .iter()
        .map(|p| (p.id.as_str(), p.buying_price))
        .collect();

    sales
        .iter()
        .flat_map(|s| s.items.iter())
        .map(|item| {
            buying
                .get(item.product_id.as_str())
                .copied()
                .unwrap_or_default()
                .multiply_quantity(item.quantity)
        })
        .sum()
}

/// Per-product velocity in catalog order, followed by deleted products in
/// the order their first sale line was seen.
fn product_velocity(sales: &[Sale], products: &[Product]) -> Vec<ProductVelocity> {
    let mut stats: Vec<ProductVelocity> = products
        .iter()
        .map(|p| ProductVelocity {
            product_id: p.id.clone(),
            name: p.name.clone(),
            qty_sold: 0,
            revenue: Money::zero(),
        })
        .collect();
    let mut index: HashMap<String, usize> = stats
        .iter()
        .enumerate()
        .map(|(i, v)| (v.product_id.clone(), i))
        .collect();

    for item in sales.iter().flat_map(|s| s.items.iter()) {
        let slot = match index.get(&item.product_id) {
            Some(&slot) => slot,
            None => {
                stats.push(ProductVelocity {
                    product_id: item.product_id.clone(),
                    name: item.name.clone(),
                    qty_sold: 0,
                    revenue: Money::zero(),
                });
                index.insert(item.product_id.clone(), stats.len() - 1);
                stats.len() - 1
            }
        };
        stats[slot].qty_sold += item.quantity;
        stats[slot].revenue += item.subtotal;
    }

    stats
}

fn fast_movers(stats: &[ProductVelocity]) -> Vec<ProductVelocity> {
    let mut sold: Vec<ProductVelocity> = stats.iter().filter(|v| v.qty_sold > 0).cloned().collect();
    // sort_by is stable: ties keep their input order
    sold.sort_by(|a, b| b.qty_sold.cmp(&a.qty_sold));
    sold.truncate(VELOCITY_LIST_LEN);
    sold
}

fn slow_movers(stats: &[ProductVelocity], products: &[Product]) -> Vec<ProductVelocity> {
    let active: HashSet<&str> = products.iter().map(|p| p.id.as_str()).collect();
    let mut candidates: Vec<ProductVelocity> = stats
        .iter()
        .filter(|v| active.contains(v.product_id.as_str()))
        .cloned()
        .collect();
    candidates.sort_by(|a, b| a.qty_sold.cmp(&b.qty_sold));
    candidates.truncate(VELOCITY_LIST_LEN);
    candidates
}

fn combined_history(sales: &[Sale], expenses: &[Expense]) -> Vec<HistoryEntry> {
    let mut history: Vec<HistoryEntry> = sales
        .iter()
        .map(HistoryEntry::from_sale)
        .chain(expenses.iter().map(HistoryEntry::from_expense))
        .collect();
    history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    history
}

/// Builds the full report for the inclusive window `[start, end]`.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use tally_core::defaults::sample_products;
/// use tally_core::reporting::build_report;
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
/// let report = build_report(&[], &[], &sample_products(), start, end);
///
/// assert_eq!(report.financials.transaction_count, 0);
/// assert!(report.fast_moving.is_empty());
/// assert_eq!(report.slow_moving.len(), 5);
/// ```
pub fn build_report(
    sales: &[Sale],
    expenses: &[Expense],
    products: &[Product],
    start: NaiveDate,
    end: NaiveDate,
) -> ReportResult {
    let sales: Vec<Sale> = sales
        .iter()
        .filter(|s| in_window(s.day(), start, end))
        .cloned()
        .collect();
    let expenses: Vec<Expense> = expenses
        .iter()
        .filter(|e| in_window(e.date, start, end))
        .cloned()
        .collect();

    let financials = compute_financials(&sales, &expenses, products);
    let stats = product_velocity(&sales, products);

    ReportResult {
        start,
        end,
        financials,
        fast_moving: fast_movers(&stats),
        slow_moving: slow_movers(&stats, products),
        low_stock: products.iter().filter(|p| p.is_low_stock()).cloned().collect(),
        history: combined_history(&sales, &expenses),
        sales,
        expenses,
    }
}

// =============================================================================
// CSV Export
// =============================================================================

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_amount(value: Money) -> String {
    format!("{:.2}", value.amount())
}

impl ReportResult {
    /// Renders the spreadsheet export: financial summary, sales
    /// transactions, then expense breakdown.
    pub fn to_csv(&self, store_name: &str) -> String {
        let mut rows: Vec<String> = vec![
            csv_field(&format!("{} Financial Report", store_name)),
            format!("Period: {} to {}", self.start, self.end),
            String::new(),
            "FINANCIAL SUMMARY".to_string(),
        ];

        let f = &self.financials;
        for (label, value) in [
            ("Total Revenue", f.revenue),
            ("Cost of Goods Sold", f.cogs),
            ("Gross Profit", f.gross_profit),
            ("Total Expenses", f.expenses),
            ("Net Profit", f.net_profit),
        ] {
            rows.push(format!("{},{}", label, csv_amount(value)));
        }
        rows.push(String::new());

        rows.push("SALES TRANSACTIONS".to_string());
        rows.push("Date,Receipt ID,Cashier,Payment Method,Items,Total".to_string());
        for sale in &self.sales {
            let items = sale
                .items
                .iter()
                .map(|i| format!("{}x {}", i.quantity, i.name))
                .collect::<Vec<_>>()
                .join("; ");
            rows.push(format!(
                "{},{},{},{},\"{}\",{}",
                sale.day(),
                csv_field(&sale.id),
                csv_field(&sale.cashier_name),
                sale.payment_method,
                items.replace('"', "\"\""),
                csv_amount(sale.total_amount),
            ));
        }
        rows.push(String::new());

        rows.push("EXPENSE BREAKDOWN".to_string());
        rows.push("Date,Category,Description,Amount".to_string());
        for expense in &self.expenses {
            rows.push(format!(
                "{},{},{},{}",
                expense.date,
                csv_field(&expense.category),
                csv_field(&expense.description),
                csv_amount(expense.amount),
            ));
        }

        rows.join("\n")
    }

    /// Suggested download name: `Report_<start>_<end>.csv`.
    pub fn csv_file_name(&self) -> String {
        format!("Report_{}_{}.csv", self.start, self.end)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
