//! Database module: models, schema, and the ledger store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and query filters
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `store.rs`: the `LedgerStore` trait handlers are written against
//! - `sqlite.rs`: the SQLite implementation

pub mod models;
pub mod schema;
pub mod sqlite;
pub mod store;

pub use models::{
    Category, CategoryId, CategoryOrder, CategoryTotal, EntryFields, EntryFilter, EntryId,
    LedgerEntry,
};
pub use sqlite::{SqliteLedgerStore, SqlitePool};
pub use store::LedgerStore;
