//! # Console Commands
//!
//! One module per operator command.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (argument parsing, dispatch)
//! ├── dashboard.rs  ◄─── 7-day summary
//! ├── report.rs     ◄─── Financial report, CSV export
//! ├── sale.rs       ◄─── Ring up a sale
//! ├── products.rs   ◄─── Catalog search
//! ├── activity.rs   ◄─── Audit trail
//! └── backup.rs     ◄─── JSON export / import
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  tally report monthly --pin 1234 --csv ./out                           │
//! │         │                                                               │
//! │         │ parse()                                                       │
//! │         ▼                                                               │
//! │  Command::Report { pin, period, csv, json }                            │
//! │         │                                                               │
//! │         │ execute(command, &mut state)                                  │
//! │         ▼                                                               │
//! │  sign in ─► build report ─► sign out ─► persist(dirty)                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  String printed to stdout                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command that needs a role takes `--pin`. The login and logout are
//! recorded in the activity log like a session on the till.

pub mod activity;
pub mod backup;
pub mod dashboard;
pub mod products;
pub mod report;
pub mod sale;

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tally_core::{Discount, PaymentMethod, ReportPeriod};

use crate::error::{ConsoleError, ConsoleResult};
use crate::state::AppState;
use sale::LineRequest;

pub const USAGE: &str = "\
Tally - point of sale console

Usage: tally [--config <PATH>] <COMMAND> [OPTIONS]

Commands:
  dashboard --pin <PIN> [--json]
      Last 7 days: revenue, profit, stock alerts
  report [daily|monthly|yearly|<START> <END>] --pin <PIN> [--csv <PATH>] [--json]
      Financial report for a window (default: monthly)
  sell <ITEM[:QTY]>... --pin <PIN> [--method cash|zaad|edahab] [--discount <10%|5>]
      Ring up a sale. ITEM is a product id, SKU or barcode
  products [QUERY] [--category <NAME>]
      Search the catalog
  activity --pin <PIN> [--limit <N>]
      Recent audit entries (default: 20)
  export --pin <PIN> [--out <PATH>]
      Write a JSON backup of all data
  import <FILE> --pin <PIN>
      Restore data from a JSON backup
  help
      Show this message

Environment:
  TALLY_DB_PATH, TALLY_STORE_NAME, TALLY_CURRENCY_SYMBOL, TALLY_LOG, TALLY_CONFIG
  RUST_LOG overrides the log filter";

const VALUE_OPTIONS: [&str; 8] = [
    "--pin",
    "--method",
    "--discount",
    "--csv",
    "--category",
    "--config",
    "--out",
    "--limit",
];

const SWITCHES: [&str; 3] = ["--json", "--help", "-h"];

const DEFAULT_ACTIVITY_LIMIT: usize = 20;

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dashboard {
        pin: String,
        json: bool,
    },
    Report {
        pin: String,
        period: ReportPeriod,
        csv: Option<PathBuf>,
        json: bool,
    },
    Sell {
        pin: String,
        method: PaymentMethod,
        discount: Option<Discount>,
        lines: Vec<LineRequest>,
    },
    Products {
        query: String,
        category: Option<String>,
    },
    Activity {
        pin: String,
        limit: usize,
    },
    Export {
        pin: String,
        out: Option<PathBuf>,
    },
    Import {
        pin: String,
        file: PathBuf,
    },
    Help,
}

impl Command {
    /// Commands that never touch the store.
    pub fn is_offline(&self) -> bool {
        matches!(self, Command::Help)
    }
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

// =============================================================================
// Argument Parsing
// =============================================================================

#[derive(Debug, Default)]
struct ArgList {
    positional: Vec<String>,
    options: HashMap<&'static str, String>,
    switches: HashSet<&'static str>,
}

impl ArgList {
    fn parse(args: &[String]) -> ConsoleResult<Self> {
        let mut list = ArgList::default();
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            if let Some(name) = VALUE_OPTIONS.iter().find(|o| **o == arg) {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| ConsoleError::usage(format!("{} needs a value", name)))?;
                list.options.insert(*name, value.clone());
                i += 1;
            } else if let Some(name) = SWITCHES.iter().find(|s| **s == arg) {
                list.switches.insert(*name);
            } else if arg.starts_with("--") {
                return Err(ConsoleError::usage(format!("Unknown option: {}", arg)));
            } else {
                list.positional.push(arg.to_string());
            }
            i += 1;
        }
        Ok(list)
    }

    fn pin(&self) -> ConsoleResult<String> {
        self.options
            .get("--pin")
            .cloned()
            .ok_or_else(|| ConsoleError::usage("This command needs --pin <PIN>"))
    }

    fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    fn switch(&self, name: &str) -> bool {
        self.switches.contains(name)
    }
}

/// Parses the arguments after the program name.
pub fn parse(args: &[String]) -> ConsoleResult<Invocation> {
    let list = ArgList::parse(args)?;
    let config_path = list.option("--config").map(PathBuf::from);

    if list.switch("--help") || list.switch("-h") {
        return Ok(Invocation {
            config_path,
            command: Command::Help,
        });
    }

    let Some((name, rest)) = list.positional.split_first() else {
        return Ok(Invocation {
            config_path,
            command: Command::Help,
        });
    };

    let command = match name.as_str() {
        "dashboard" => Command::Dashboard {
            pin: list.pin()?,
            json: list.switch("--json"),
        },
        "report" => Command::Report {
            pin: list.pin()?,
            period: report::parse_period(rest)?,
            csv: list.option("--csv").map(PathBuf::from),
            json: list.switch("--json"),
        },
        "sell" => {
            if rest.is_empty() {
                return Err(ConsoleError::usage("sell needs at least one item"));
            }
            Command::Sell {
                pin: list.pin()?,
                method: list
                    .option("--method")
                    .unwrap_or("cash")
                    .parse::<PaymentMethod>()
                    .map_err(|e| ConsoleError::usage(e.to_string()))?,
                discount: list.option("--discount").map(sale::parse_discount).transpose()?,
                lines: rest
                    .iter()
                    .map(|s| s.parse::<LineRequest>())
                    .collect::<ConsoleResult<Vec<_>>>()?,
            }
        }
        "products" => Command::Products {
            query: rest.join(" "),
            category: list.option("--category").map(str::to_string),
        },
        "activity" => Command::Activity {
            pin: list.pin()?,
            limit: match list.option("--limit") {
                Some(n) => n
                    .parse()
                    .map_err(|_| ConsoleError::usage(format!("Invalid limit: {}", n)))?,
                None => DEFAULT_ACTIVITY_LIMIT,
            },
        },
        "export" => Command::Export {
            pin: list.pin()?,
            out: list.option("--out").map(PathBuf::from),
        },
        "import" => Command::Import {
            pin: list.pin()?,
            file: rest
                .first()
                .map(PathBuf::from)
                .ok_or_else(|| ConsoleError::usage("import needs a backup file"))?,
        },
        "help" => Command::Help,
        other => return Err(ConsoleError::usage(format!("Unknown command: {}", other))),
    };

    Ok(Invocation {
        config_path,
        command,
    })
}

// =============================================================================
// Dispatch
// =============================================================================

/// Runs one command and returns what to print.
pub async fn execute(command: Command, state: &mut AppState) -> ConsoleResult<String> {
    match command {
        Command::Dashboard { pin, json } => dashboard::run(state, &pin, json).await,
        Command::Report {
            pin,
            period,
            csv,
            json,
        } => report::run(state, &pin, period, csv.as_deref(), json).await,
        Command::Sell {
            pin,
            method,
            discount,
            lines,
        } => sale::run(state, &pin, method, discount, &lines).await,
        Command::Products { query, category } => products::run(state, &query, category.as_deref()),
        Command::Activity { pin, limit } => activity::run(state, &pin, limit).await,
        Command::Export { pin, out } => backup::export(state, &pin, out.as_deref()).await,
        Command::Import { pin, file } => backup::import(state, &pin, &file).await,
        Command::Help => Ok(USAGE.to_string()),
    }
}
