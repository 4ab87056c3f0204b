//! SQL DDL for initializing the ledger storage.

/// SQLite schema with:
/// - `categories`: lookup table, `category_name` UNIQUE
/// - `kakeibo`: one row per ledger entry, `category_id` references `categories`
/// - `date` stored as TEXT `YYYY-MM-DD`, so range filters compare lexically
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS kakeibo (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    category_id INTEGER NOT NULL REFERENCES categories(id),
    money INTEGER NOT NULL,
    memo TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_kakeibo_date ON kakeibo(date);
CREATE INDEX IF NOT EXISTS idx_kakeibo_category_id ON kakeibo(category_id);
"#;
