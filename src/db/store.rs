use std::future::Future;

use crate::db::models::{
    Category, CategoryOrder, CategoryTotal, EntryFields, EntryFilter, EntryId, LedgerEntry,
};
use crate::error::KakeiboError;
use crate::types::month::YearMonth;

/// Persistence seam for ledger entries and categories.
///
/// Lookups by id that miss return `KakeiboError::EntryNotFound`.
pub trait LedgerStore: Clone + Send + Sync + 'static {
    fn list(
        &self,
        filter: &EntryFilter,
    ) -> impl Future<Output = Result<Vec<LedgerEntry>, KakeiboError>> + Send;

    fn get(&self, id: EntryId) -> impl Future<Output = Result<LedgerEntry, KakeiboError>> + Send;

    fn create(
        &self,
        fields: EntryFields,
    ) -> impl Future<Output = Result<LedgerEntry, KakeiboError>> + Send;

    fn update(
        &self,
        id: EntryId,
        fields: EntryFields,
    ) -> impl Future<Output = Result<LedgerEntry, KakeiboError>> + Send;

    fn delete(&self, id: EntryId) -> impl Future<Output = Result<(), KakeiboError>> + Send;

    fn categories(
        &self,
        order: CategoryOrder,
    ) -> impl Future<Output = Result<Vec<Category>, KakeiboError>> + Send;

    /// Per-category sums over the filtered entries. Categories without a
    /// matching entry are absent.
    fn totals_by_category(
        &self,
        filter: &EntryFilter,
    ) -> impl Future<Output = Result<Vec<CategoryTotal>, KakeiboError>> + Send;

    /// Distinct months that have at least one entry, ascending.
    fn months(&self) -> impl Future<Output = Result<Vec<YearMonth>, KakeiboError>> + Send;
}
