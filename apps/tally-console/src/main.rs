//! # Tally Console Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Console                                    │
//! │                                                                         │
//! │  $ tally report monthly --pin 1234                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  main.rs ────► collects args, prints output, maps errors to exit codes │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  lib.rs ─────► config, logging, store, command dispatch                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  SQLite Database (tally.db, WAL mode)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // The actual setup is in lib.rs for better testability
    match tally_console::run(&args).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
