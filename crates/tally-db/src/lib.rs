//! # tally-db: Persistence Layer for Tally
//!
//! Mirrors the in-memory shop state to a local SQLite key-value store.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Data Flow                                  │
//! │                                                                         │
//! │  Console command (e.g. `import backup.json`)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Shop (tally-core) ──► mutation returns Dirty                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     tally-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────┐   ┌──────────────┐ │   │
//! │  │   │   Database    │    │   Repository     │   │  Migrations  │ │   │
//! │  │   │   (pool.rs)   │◄───│ (collection.rs)  │   │  (embedded)  │ │   │
//! │  │   │  SqlitePool   │    │ load/save by key │   │ 001_kv_store │ │   │
//! │  │   └───────────────┘    └──────────────────┘   └──────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (platform data dir, or TALLY_DB_PATH)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("tally.db")).await?;
//! let mut shop = Shop::new(db.collections().load_state().await?);
//!
//! let dirty = shop.add_category("Phones")?;
//! db.collections().save_dirty(shop.state(), dirty).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::collection::CollectionRepository;
