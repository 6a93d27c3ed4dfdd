//! # Collection Repository
//!
//! Loads and saves the shop's collections, one JSON document per key.
//!
//! ## Storage Layout
//! ```text
//! kv_store
//! ┌──────────────┬──────────────────────────────┬──────────────────────────┐
//! │ key          │ value                        │ updated_at               │
//! ├──────────────┼──────────────────────────────┼──────────────────────────┤
//! │ products     │ [{"id":"p1",...}, ...]       │ 2024-03-15T10:00:00Z     │
//! │ sales        │ [{"id":"...","items":[...]}] │                          │
//! │ expenses     │ [...]                        │                          │
//! │ users        │ [...]                        │                          │
//! │ categories   │ ["Electronics", ...]         │                          │
//! │ activityLogs │ [...]                        │                          │
//! └──────────────┴──────────────────────────────┴──────────────────────────┘
//! ```
//!
//! A missing key means "never saved": products, users and categories fall
//! back to the seed data, the rest start empty.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use tally_core::defaults::{default_categories, default_users, sample_products};
use tally_core::{ActivityLog, Collection, Dirty, Expense, Product, Sale, ShopState, User};

const UPSERT_SQL: &str = r#"
    INSERT INTO kv_store (key, value, updated_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at
"#;

fn upsert(key: &'static str, value: String) -> Query<'static, Sqlite, SqliteArguments<'static>> {
    sqlx::query(UPSERT_SQL)
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
}

/// Serializes one collection of the state.
fn encode(state: &ShopState, collection: Collection) -> serde_json::Result<String> {
    match collection {
        Collection::Products => serde_json::to_string(&state.products),
        Collection::Sales => serde_json::to_string(&state.sales),
        Collection::Expenses => serde_json::to_string(&state.expenses),
        Collection::Users => serde_json::to_string(&state.users),
        Collection::Categories => serde_json::to_string(&state.categories),
        Collection::ActivityLogs => serde_json::to_string(&state.activity_logs),
    }
}

/// Repository for the per-collection documents.
#[derive(Debug, Clone)]
pub struct CollectionRepository {
    pool: SqlitePool,
}

impl CollectionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CollectionRepository { pool }
    }

    // =========================================================================
    // Raw documents
    // =========================================================================

    /// Returns the stored JSON text for a key, if any.
    pub async fn load_raw(&self, collection: Collection) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(collection.key())
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn save_raw(&self, collection: Collection, value: String) -> DbResult<()> {
        upsert(collection.key(), value).execute(&self.pool).await?;
        debug!(key = collection.key(), "Collection saved");
        Ok(())
    }

    /// Loads and decodes one collection. `None` if it was never saved.
    pub async fn load<T: DeserializeOwned>(&self, collection: Collection) -> DbResult<Option<T>> {
        match self.load_raw(collection).await? {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| DbError::corrupt(collection.key(), e)),
            None => Ok(None),
        }
    }

    /// Encodes and saves one collection.
    pub async fn save<T: Serialize + ?Sized>(&self, collection: Collection, value: &T) -> DbResult<()> {
        let text = serde_json::to_string(value)?;
        self.save_raw(collection, text).await
    }

    /// Keys that have been saved at least once, sorted.
    pub async fn stored_keys(&self) -> DbResult<Vec<String>> {
        let keys: Vec<String> = sqlx::query_scalar("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }

    /// `true` once any collection has been saved.
    pub async fn is_initialized(&self) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store")
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    // =========================================================================
    // Typed collections
    // =========================================================================

    pub async fn load_products(&self) -> DbResult<Option<Vec<Product>>> {
        self.load(Collection::Products).await
    }

    pub async fn save_products(&self, products: &[Product]) -> DbResult<()> {
        self.save(Collection::Products, products).await
    }

    pub async fn load_sales(&self) -> DbResult<Option<Vec<Sale>>> {
        self.load(Collection::Sales).await
    }

    pub async fn save_sales(&self, sales: &[Sale]) -> DbResult<()> {
        self.save(Collection::Sales, sales).await
    }

    pub async fn load_expenses(&self) -> DbResult<Option<Vec<Expense>>> {
        self.load(Collection::Expenses).await
    }

    pub async fn save_expenses(&self, expenses: &[Expense]) -> DbResult<()> {
        self.save(Collection::Expenses, expenses).await
    }

    pub async fn load_users(&self) -> DbResult<Option<Vec<User>>> {
        self.load(Collection::Users).await
    }

    pub async fn save_users(&self, users: &[User]) -> DbResult<()> {
        self.save(Collection::Users, users).await
    }

    pub async fn load_categories(&self) -> DbResult<Option<Vec<String>>> {
        self.load(Collection::Categories).await
    }

    pub async fn save_categories(&self, categories: &[String]) -> DbResult<()> {
        self.save(Collection::Categories, categories).await
    }

    pub async fn load_activity_logs(&self) -> DbResult<Option<Vec<ActivityLog>>> {
        self.load(Collection::ActivityLogs).await
    }

    pub async fn save_activity_logs(&self, logs: &[ActivityLog]) -> DbResult<()> {
        self.save(Collection::ActivityLogs, logs).await
    }

    // =========================================================================
    // Whole state
    // =========================================================================

    /// Loads every collection, falling back to seed data for keys that were
    /// never saved.
    pub async fn load_state(&self) -> DbResult<ShopState> {
        let state = ShopState {
            products: self.load_products().await?.unwrap_or_else(sample_products),
            sales: self.load_sales().await?.unwrap_or_default(),
            expenses: self.load_expenses().await?.unwrap_or_default(),
            users: self.load_users().await?.unwrap_or_else(default_users),
            categories: self.load_categories().await?.unwrap_or_else(default_categories),
            activity_logs: self.load_activity_logs().await?.unwrap_or_default(),
        };

        info!(
            products = state.products.len(),
            sales = state.sales.len(),
            expenses = state.expenses.len(),
            "Shop state loaded"
        );
        Ok(state)
    }

    /// Saves every collection in one transaction.
    pub async fn save_state(&self, state: &ShopState) -> DbResult<()> {
        self.save_dirty(state, Dirty::ALL).await
    }

    /// Saves only the collections marked dirty, in one transaction.
    ///
    /// Every document is encoded before the transaction opens, so an
    /// encoding failure writes nothing.
    pub async fn save_dirty(&self, state: &ShopState, dirty: Dirty) -> DbResult<()> {
        if dirty.is_empty() {
            return Ok(());
        }

        let documents = dirty
            .collections()
            .map(|c| encode(state, c).map(|text| (c, text)))
            .collect::<serde_json::Result<Vec<_>>>()?;

        let mut tx = self.pool.begin().await?;
        for (collection, text) in documents {
            upsert(collection.key(), text).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        debug!(
            collections = ?dirty.collections().map(|c| c.key()).collect::<Vec<_>>(),
            "Dirty collections saved"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
