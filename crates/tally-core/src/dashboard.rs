//! # Dashboard Aggregator
//!
//! Rolling seven-day summary: today and the six days before it, computed
//! from the invocation instant.
//!
//! Uses the same revenue and COGS rules as [`crate::reporting`]. Stock health
//! and inventory value look at the whole catalog, not the window.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::reporting::cost_of_goods;
use crate::types::{Expense, Product, Sale};

/// Days covered by the dashboard, today included.
pub const DASHBOARD_WINDOW_DAYS: u64 = 7;

/// Revenue for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailyRevenue {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardSummary {
    #[ts(as = "String")]
    pub window_start: NaiveDate,
    #[ts(as = "String")]
    pub window_end: NaiveDate,
    pub revenue: Money,
    pub cogs: Money,
    pub gross_profit: Money,
    pub expenses: Money,
    pub net_profit: Money,
    pub transaction_count: usize,
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
    /// Σ buyingPrice × quantity over the whole catalog.
    pub inventory_value: Money,
    /// One point per day, oldest first.
    pub daily_revenue: Vec<DailyRevenue>,
}

/// Builds the dashboard for the week ending on `now`'s calendar day (UTC).
pub fn build_dashboard(
    sales: &[Sale],
    expenses: &[Expense],
    products: &[Product],
    now: DateTime<Utc>,
) -> DashboardSummary {
    let window_end = now.date_naive();
    let window_start = window_end
        .checked_sub_days(Days::new(DASHBOARD_WINDOW_DAYS - 1))
        .unwrap_or(window_end);
    let in_window = |day: NaiveDate| day >= window_start && day <= window_end;

    let recent_sales: Vec<Sale> = sales.iter().filter(|s| in_window(s.day())).cloned().collect();
    let revenue: Money = recent_sales.iter().map(|s| s.total_amount).sum();
    let cogs = cost_of_goods(&recent_sales, products);
    let gross_profit = revenue - cogs;
    let expenses_total: Money = expenses
        .iter()
        .filter(|e| in_window(e.date))
        .map(|e| e.amount)
        .sum();

    let daily_revenue = window_start
        .iter_days()
        .take_while(|day| *day <= window_end)
        .map(|date| DailyRevenue {
            date,
            amount: recent_sales
                .iter()
                .filter(|s| s.day() == date)
                .map(|s| s.total_amount)
                .sum(),
        })
        .collect();

    DashboardSummary {
        window_start,
        window_end,
        revenue,
        cogs,
        gross_profit,
        expenses: expenses_total,
        net_profit: gross_profit - expenses_total,
        transaction_count: recent_sales.len(),
        low_stock_count: products.iter().filter(|p| p.is_low_stock()).count(),
        out_of_stock_count: products.iter().filter(|p| p.is_out_of_stock()).count(),
        inventory_value: products.iter().map(Product::stock_value).sum(),
        daily_revenue,
    }
}
