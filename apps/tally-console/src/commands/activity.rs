//! # Activity Command
//!
//! Prints the newest audit entries.

use tally_core::{ActivityLog, Permission};

use crate::error::ConsoleResult;
use crate::state::AppState;

pub async fn run(state: &mut AppState, pin: &str, limit: usize) -> ConsoleResult<String> {
    let (user, mut dirty) = state.sign_in(pin, Permission::ActivityLog)?;

    let output = render(&state.shop().state().activity_logs, limit);

    dirty |= state.sign_out(&user);
    state.persist(dirty).await?;
    Ok(output)
}

pub fn render(logs: &[ActivityLog], limit: usize) -> String {
    let mut lines: Vec<String> = logs
        .iter()
        .take(limit)
        .map(|log| {
            format!(
                "{}  {:<16} {:<17} {}",
                log.timestamp.format("%Y-%m-%d %H:%M:%S"),
                log.user_name,
                log.action.as_str(),
                log.details
            )
        })
        .collect();
    lines.push(format!("{} of {} entries", logs.len().min(limit), logs.len()));
    lines.join("\n")
}
