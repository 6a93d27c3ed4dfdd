//! # Dashboard Command
//!
//! Seven-day summary for the admin home screen.

use tally_core::{DashboardSummary, Permission};

use crate::config::ConsoleConfig;
use crate::error::ConsoleResult;
use crate::state::AppState;

pub async fn run(state: &mut AppState, pin: &str, json: bool) -> ConsoleResult<String> {
    let (user, mut dirty) = state.sign_in(pin, Permission::Dashboard)?;

    let summary = state.shop().dashboard();

    let output = if json {
        serde_json::to_string_pretty(&summary)?
    } else {
        render(&summary, &state.config)
    };

    dirty |= state.sign_out(&user);
    state.persist(dirty).await?;
    Ok(output)
}

pub fn render(summary: &DashboardSummary, config: &ConsoleConfig) -> String {
    let money = |m| config.format_currency(m);
    let row = |label: &str, value: String| format!("{:<18}{:>14}", label, value);

    let mut lines = vec![
        format!(
            "{} - Dashboard ({} to {})",
            config.store_name, summary.window_start, summary.window_end
        ),
        String::new(),
        row("Revenue", money(summary.revenue)),
        row("Cost of goods", money(summary.cogs)),
        row("Gross profit", money(summary.gross_profit)),
        row("Expenses", money(summary.expenses)),
        row("Net profit", money(summary.net_profit)),
        row("Transactions", summary.transaction_count.to_string()),
        String::new(),
        row("Inventory value", money(summary.inventory_value)),
        row("Low stock", summary.low_stock_count.to_string()),
        row("Out of stock", summary.out_of_stock_count.to_string()),
        String::new(),
        "Daily revenue".to_string(),
    ];
    lines.extend(
        summary
            .daily_revenue
            .iter()
            .map(|day| format!("  {}  {:>12}", day.date, money(day.amount))),
    );

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{app, ADMIN_PIN, CASHIER_PIN};
    use crate::error::ConsoleError;

    #[tokio::test]
    async fn test_dashboard_for_sample_shop() {
        let mut state = app().await;
        let output = run(&mut state, ADMIN_PIN, false).await.unwrap();

        assert!(output.contains("(2024-03-09 to 2024-03-15)"));
        assert!(output.contains("$2350.00"));
        assert!(output.matches("$0.00").count() >= 7);
    }

    #[tokio::test]
    async fn test_dashboard_json_and_audit() {
        let mut state = app().await;
        let output = run(&mut state, ADMIN_PIN, true).await.unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["lowStockCount"], 1);
        assert_eq!(value["dailyRevenue"].as_array().unwrap().len(), 7);

        // Login and logout were recorded and saved.
        let logs = state.db().collections().load_activity_logs().await.unwrap().unwrap();
        assert_eq!(logs.len(), 2);
    }

    #[tokio::test]
    async fn test_cashier_cannot_open_dashboard() {
        let mut state = app().await;
        let err = run(&mut state, CASHIER_PIN, false).await.unwrap_err();

        assert!(matches!(err, ConsoleError::PermissionDenied { .. }));
        assert!(state.shop().state().activity_logs.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_pin() {
        let mut state = app().await;
        let err = run(&mut state, "9999", false).await.unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidPin));
    }
}
