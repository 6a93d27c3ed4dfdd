//! # Report Command
//!
//! Financial report for a date window, printed or exported as CSV.
//!
//! ## Window Arguments
//! | Argument                  | Window                          |
//! |---------------------------|---------------------------------|
//! | (none), `monthly`         | current month                   |
//! | `daily`, `today`          | today                           |
//! | `yearly`                  | current calendar year           |
//! | `2024-03-01 2024-03-31`   | custom, both ends inclusive     |

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tally_core::ports::Clock;
use tally_core::reporting::ProductVelocity;
use tally_core::{Permission, ReportPeriod, ReportResult};
use tracing::info;

use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, ConsoleResult};
use crate::state::AppState;

pub fn parse_period(args: &[String]) -> ConsoleResult<ReportPeriod> {
    match args {
        [] => Ok(ReportPeriod::Monthly),
        [one] => match one.to_lowercase().as_str() {
            "daily" | "today" => Ok(ReportPeriod::Daily),
            "monthly" => Ok(ReportPeriod::Monthly),
            "yearly" => Ok(ReportPeriod::Yearly),
            other => Err(ConsoleError::usage(format!("Unknown report period: {}", other))),
        },
        [start, end] => {
            let start = parse_date(start)?;
            let end = parse_date(end)?;
            if start > end {
                return Err(ConsoleError::usage("Report start must not be after its end"));
            }
            Ok(ReportPeriod::Custom { start, end })
        }
        _ => Err(ConsoleError::usage("report takes a period or two dates")),
    }
}

fn parse_date(s: &str) -> ConsoleResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ConsoleError::usage(format!("Invalid date (expected YYYY-MM-DD): {}", s)))
}

pub async fn run(
    state: &mut AppState,
    pin: &str,
    period: ReportPeriod,
    csv: Option<&Path>,
    json: bool,
) -> ConsoleResult<String> {
    let (user, mut dirty) = state.sign_in(pin, Permission::Reports)?;

    let shop = state.shop();
    let (start, end) = period.range(shop.clock().now().date_naive());
    let report = shop.report(start, end);

    let mut output = if json {
        serde_json::to_string_pretty(&report)?
    } else {
        render(&report, &state.config)
    };

    if let Some(path) = csv {
        let path = csv_path(path, &report);
        std::fs::write(&path, report.to_csv(&state.config.store_name))?;
        info!(path = %path.display(), "Report exported");
        output.push_str(&format!("\n\nCSV written to {}", path.display()));
    }

    dirty |= state.sign_out(&user);
    state.persist(dirty).await?;
    Ok(output)
}

/// A directory gets the default `Report_<start>_<end>.csv` name.
fn csv_path(path: &Path, report: &ReportResult) -> PathBuf {
    if path.is_dir() {
        path.join(report.csv_file_name())
    } else {
        path.to_path_buf()
    }
}

pub fn render(report: &ReportResult, config: &ConsoleConfig) -> String {
    let money = |m| config.format_currency(m);
    let row = |label: &str, value: String| format!("{:<18}{:>14}", label, value);
    let f = &report.financials;

    let mut lines = vec![
        format!("{} - Financial Report", config.store_name),
        format!("Period: {} to {}", report.start, report.end),
        String::new(),
        row("Revenue", money(f.revenue)),
        row("Discounts", money(f.discounts)),
        row("Cost of goods", money(f.cogs)),
        row("Gross profit", money(f.gross_profit)),
        row("Expenses", money(f.expenses)),
        row("Net profit", money(f.net_profit)),
        row("Transactions", f.transaction_count.to_string()),
    ];

    velocity_section(&mut lines, "Fast movers", &report.fast_moving, config);
    velocity_section(&mut lines, "Slow movers", &report.slow_moving, config);

    section(
        &mut lines,
        "Low stock",
        report.low_stock.iter().map(|p| {
            format!("  {:<28} {:>4} left (min {})", p.name, p.quantity, p.min_stock_level)
        }),
    );
    section(
        &mut lines,
        "History",
        report.history.iter().map(|entry| {
            format!(
                "  {}  {:<32} {:<24} {:>12}",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                entry.description,
                entry.detail,
                money(entry.amount)
            )
        }),
    );

    lines.join("\n")
}

fn velocity_section(lines: &mut Vec<String>, title: &str, rows: &[ProductVelocity], config: &ConsoleConfig) {
    section(
        lines,
        title,
        rows.iter().enumerate().map(|(rank, row)| {
            format!(
                "  {}. {:<28} {:>5} sold {:>12}",
                rank + 1,
                row.name,
                row.qty_sold,
                config.format_currency(row.revenue)
            )
        }),
    );
}

/// Blank line, title, then the rows or `(none)`.
fn section(lines: &mut Vec<String>, title: &str, rows: impl Iterator<Item = String>) {
    lines.push(String::new());
    lines.push(title.to_string());
    let before = lines.len();
    lines.extend(rows);
    if lines.len() == before {
        lines.push("  (none)".to_string());
    }
}
