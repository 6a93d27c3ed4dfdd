//! # Repository Module
//!
//! Store access behind a typed API.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Console command                                                       │
//! │       │                                                                 │
//! │       │  db.collections().save_dirty(&state, dirty)                    │
//! │       ▼                                                                 │
//! │  CollectionRepository                                                  │
//! │  ├── load_products / save_products / ... (one pair per collection)    │
//! │  ├── load_state()                                                      │
//! │  ├── save_state(&state)                                                │
//! │  └── save_dirty(&state, dirty)                                         │
//! │       │                                                                 │
//! │       │  SQL (kv_store: key → JSON document)                           │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod collection;
