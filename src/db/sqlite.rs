use crate::db::models::{
    Category, CategoryOrder, CategoryTotal, EntryFields, EntryFilter, EntryId, LedgerEntry,
};
use crate::db::schema::SQLITE_INIT;
use crate::db::store::LedgerStore;
use crate::error::KakeiboError;
use crate::types::month::YearMonth;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, QueryBuilder, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

const SELECT_ENTRY: &str = r#"SELECT k.id, k.date, k.category_id, c.category_name, k.money, k.memo
    FROM kakeibo k JOIN categories c ON c.id = k.category_id"#;

const SELECT_AMOUNTS: &str = r#"SELECT k.category_id, c.category_name, k.money AS total
    FROM kakeibo k JOIN categories c ON c.id = k.category_id"#;

#[derive(Clone)]
pub struct SqliteLedgerStore {
    pool: SqlitePool,
}

impl SqliteLedgerStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and apply the schema.
    pub async fn connect(database_url: &str) -> Result<Self, KakeiboError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let store = Self::new(pool);
        store.init_schema().await?;
        Ok(store)
    }

    /// A private in-memory database. Pinned to one connection that never
    /// expires, since every SQLite memory connection is its own database.
    pub async fn in_memory() -> Result<Self, KakeiboError> {
        let connect_opts = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(connect_opts)
            .await?;
        let store = Self::new(pool);
        store.init_schema().await?;
        Ok(store)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), KakeiboError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert every category name not present yet. Returns how many were added.
    pub async fn seed_categories(&self, names: &[String]) -> Result<u64, KakeiboError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            inserted += sqlx::query("INSERT OR IGNORE INTO categories (category_name) VALUES (?)")
                .bind(name)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &EntryFilter) {
        if filter.is_empty() {
            return;
        }
        qb.push(" WHERE ");
        let mut conditions = qb.separated(" AND ");
        if let Some(from) = filter.from {
            conditions.push("k.date >= ").push_bind_unseparated(from);
        }
        if let Some(to) = filter.to {
            conditions.push("k.date <= ").push_bind_unseparated(to);
        }
        if let Some(category_id) = filter.category_id {
            conditions
                .push("k.category_id = ")
                .push_bind_unseparated(category_id);
        }
    }
}

impl LedgerStore for SqliteLedgerStore {
    async fn list(&self, filter: &EntryFilter) -> Result<Vec<LedgerEntry>, KakeiboError> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_ENTRY);
        Self::push_filter(&mut qb, filter);
        qb.push(" ORDER BY k.id");
        let rows = qb
            .build_query_as::<LedgerEntry>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: EntryId) -> Result<LedgerEntry, KakeiboError> {
        sqlx::query_as::<_, LedgerEntry>(&format!("{SELECT_ENTRY} WHERE k.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(KakeiboError::EntryNotFound(id))
    }

    async fn create(&self, fields: EntryFields) -> Result<LedgerEntry, KakeiboError> {
        let id = sqlx::query(
            "INSERT INTO kakeibo (date, category_id, money, memo) VALUES (?, ?, ?, ?)",
        )
        .bind(fields.date)
        .bind(fields.category_id)
        .bind(fields.money)
        .bind(fields.memo)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();
        debug!(id, "inserted ledger entry");
        self.get(id).await
    }

    async fn update(&self, id: EntryId, fields: EntryFields) -> Result<LedgerEntry, KakeiboError> {
        let affected = sqlx::query(
            r#"UPDATE kakeibo SET
                date = ?,
                category_id = ?,
                money = ?,
                memo = ?
              WHERE id = ?"#,
        )
        .bind(fields.date)
        .bind(fields.category_id)
        .bind(fields.money)
        .bind(fields.memo)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        if affected == 0 {
            return Err(KakeiboError::EntryNotFound(id));
        }
        self.get(id).await
    }

    async fn delete(&self, id: EntryId) -> Result<(), KakeiboError> {
        let affected = sqlx::query("DELETE FROM kakeibo WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if affected == 0 {
            return Err(KakeiboError::EntryNotFound(id));
        }
        Ok(())
    }

    async fn categories(&self, order: CategoryOrder) -> Result<Vec<Category>, KakeiboError> {
        let sql = match order {
            CategoryOrder::Id => "SELECT id, category_name FROM categories ORDER BY id",
            CategoryOrder::NameDesc => {
                "SELECT id, category_name FROM categories ORDER BY category_name DESC"
            }
        };
        let rows = sqlx::query_as::<_, Category>(sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn totals_by_category(
        &self,
        filter: &EntryFilter,
    ) -> Result<Vec<CategoryTotal>, KakeiboError> {
        // SQLite's SUM errors out on i64 overflow, so rows are summed here
        // in i128 and clamped once per category.
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_AMOUNTS);
        Self::push_filter(&mut qb, filter);
        qb.push(" ORDER BY k.category_id");
        let rows = qb
            .build_query_as::<CategoryTotal>()
            .fetch_all(&self.pool)
            .await?;

        let mut sums: Vec<(CategoryTotal, i128)> = Vec::new();
        for row in rows {
            match sums.last_mut() {
                Some((last, sum)) if last.category_id == row.category_id => {
                    *sum += i128::from(row.total);
                }
                _ => {
                    let sum = i128::from(row.total);
                    sums.push((row, sum));
                }
            }
        }
        Ok(sums
            .into_iter()
            .map(|(row, sum)| CategoryTotal {
                total: sum.clamp(i64::MIN.into(), i64::MAX.into()) as i64,
                ..row
            })
            .collect())
    }

    async fn months(&self) -> Result<Vec<YearMonth>, KakeiboError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT substr(date, 1, 7) AS ym FROM kakeibo ORDER BY ym")
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(|(ym,)| ym.parse()).collect()
    }
}
