//! # Products Command
//!
//! Catalog search, same matching as the POS search box. No login needed.

use tally_core::search_products;
use tally_core::validation::validate_search_query;

use crate::error::ConsoleResult;
use crate::state::AppState;

pub fn run(state: &AppState, query: &str, category: Option<&str>) -> ConsoleResult<String> {
    let query = validate_search_query(query).map_err(tally_core::CoreError::from)?;
    let catalog = &state.shop().state().products;
    let hits = search_products(catalog, &query, category);

    let mut lines = vec![format!(
        "{:<6} {:<8} {:<28} {:<12} {:>5} {:>10}",
        "ID", "SKU", "NAME", "CATEGORY", "QTY", "PRICE"
    )];
    for p in &hits {
        let flag = if p.is_out_of_stock() {
            "  OUT"
        } else if p.is_low_stock() {
            "  LOW"
        } else {
            ""
        };
        lines.push(format!(
            "{:<6} {:<8} {:<28} {:<12} {:>5} {:>10}{}",
            p.id,
            p.sku,
            p.name,
            p.category,
            p.quantity,
            state.config.format_currency(p.selling_price),
            flag
        ));
    }
    lines.push(format!("{} of {} products", hits.len(), catalog.len()));
    Ok(lines.join("\n"))
}
