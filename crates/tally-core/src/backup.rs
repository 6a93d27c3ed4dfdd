//! # Backup
//!
//! JSON export and import of the whole shop.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  export_json(state, now)                                                │
//! │    { products, sales, expenses, users, categories, activityLogs,        │
//! │      exportedAt }                      pretty-printed, camelCase         │
//! │                                                                         │
//! │  parse_backup(text) ──► BackupDocument (every key optional)            │
//! │    └── unparseable ──► BackupError::InvalidFormat, nothing applied     │
//! │                                                                         │
//! │  BackupDocument::apply(state)                                           │
//! │    └── replaces only the collections present in the document           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BackupResult;
use crate::shop::{Dirty, ShopState};
use crate::types::{ActivityLog, Expense, Product, Sale, User};

/// Borrowed view of the state as written to a backup file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot<'a> {
    pub products: &'a [Product],
    pub sales: &'a [Sale],
    pub expenses: &'a [Expense],
    pub users: &'a [User],
    pub categories: &'a [String],
    pub activity_logs: &'a [ActivityLog],
    pub exported_at: DateTime<Utc>,
}

impl<'a> BackupSnapshot<'a> {
    pub fn new(state: &'a ShopState, exported_at: DateTime<Utc>) -> Self {
        BackupSnapshot {
            products: &state.products,
            sales: &state.sales,
            expenses: &state.expenses,
            users: &state.users,
            categories: &state.categories,
            activity_logs: &state.activity_logs,
            exported_at,
        }
    }
}

/// A parsed backup file. Absent keys leave the current collection alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    #[serde(default)]
    pub products: Option<Vec<Product>>,
    #[serde(default)]
    pub sales: Option<Vec<Sale>>,
    #[serde(default)]
    pub expenses: Option<Vec<Expense>>,
    #[serde(default)]
    pub users: Option<Vec<User>>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub activity_logs: Option<Vec<ActivityLog>>,
    #[serde(default)]
    pub exported_at: Option<DateTime<Utc>>,
}

impl BackupDocument {
    /// Replaces every collection present in the document.
    pub fn apply(self, state: &mut ShopState) -> Dirty {
        let mut dirty = Dirty::NONE;
        if let Some(products) = self.products {
            state.products = products;
            dirty |= Dirty::PRODUCTS;
        }
        if let Some(sales) = self.sales {
            state.sales = sales;
            dirty |= Dirty::SALES;
        }
        if let Some(expenses) = self.expenses {
            state.expenses = expenses;
            dirty |= Dirty::EXPENSES;
        }
        if let Some(users) = self.users {
            state.users = users;
            dirty |= Dirty::USERS;
        }
        if let Some(categories) = self.categories {
            state.categories = categories;
            dirty |= Dirty::CATEGORIES;
        }
        if let Some(activity_logs) = self.activity_logs {
            state.activity_logs = activity_logs;
            dirty |= Dirty::ACTIVITY_LOGS;
        }
        dirty
    }
}

/// Serializes the state as a pretty-printed backup document.
pub fn export_json(state: &ShopState, now: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&BackupSnapshot::new(state, now))
}

/// Parses a backup file.
///
/// ## Errors
/// `BackupError::InvalidFormat` if the text is not JSON or any present
/// collection has the wrong shape.
pub fn parse_backup(text: &str) -> BackupResult<BackupDocument> {
    Ok(serde_json::from_str(text)?)
}

/// `OriginalElectronics_Backup_2024-03-15.json`
pub fn backup_file_name(store_name: &str, date: NaiveDate) -> String {
    let stem: String = store_name.chars().filter(|c| !c.is_whitespace()).collect();
    format!("{}_Backup_{}.json", stem, date)
}
