use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub type EntryId = i64;
pub type CategoryId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub category_name: String,
}

/// A stored ledger row joined with its category name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub category_id: CategoryId,
    pub category_name: String,
    pub money: i64,
    pub memo: String,
}

/// The writable columns of a ledger entry, shared by create and update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryFields {
    pub date: NaiveDate,
    pub category_id: CategoryId,
    pub money: i64,
    pub memo: String,
}

impl From<LedgerEntry> for EntryFields {
    fn from(e: LedgerEntry) -> Self {
        Self {
            date: e.date,
            category_id: e.category_id,
            money: e.money,
            memo: e.memo,
        }
    }
}

/// Sum of `money` for one category over some filtered set of entries.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, FromRow)]
pub struct CategoryTotal {
    pub category_id: CategoryId,
    pub category_name: String,
    pub total: i64,
}

/// Optional narrowing of entry queries. Date bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category_id: Option<CategoryId>,
}

impl EntryFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            category_id: None,
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none() && self.category_id.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryOrder {
    /// Insertion order.
    Id,
    NameDesc,
}
