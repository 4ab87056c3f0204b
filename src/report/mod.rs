//! Aggregate reports over the ledger.
//!
//! The builders in `share` and `trend` are pure; the functions here gather
//! their inputs from a `LedgerStore`.

pub mod share;
pub mod trend;

pub use share::{CategoryShare, CategoryShareReport};
pub use trend::{TrendPoint, TrendReport, TrendSeries};

use tracing::info;

use crate::db::models::{CategoryOrder, EntryFilter};
use crate::db::store::LedgerStore;
use crate::error::KakeiboError;

pub async fn category_share_report<S: LedgerStore>(
    store: &S,
) -> Result<CategoryShareReport, KakeiboError> {
    let categories = store.categories(CategoryOrder::Id).await?;
    let totals = store.totals_by_category(&EntryFilter::all()).await?;
    let report = CategoryShareReport::build(&categories, &totals);
    info!(
        total = report.total,
        categories = categories.len(),
        "built category share report"
    );
    Ok(report)
}

/// One range query per month present in the ledger.
pub async fn trend_report<S: LedgerStore>(store: &S) -> Result<TrendReport, KakeiboError> {
    let categories = store.categories(CategoryOrder::NameDesc).await?;
    let months = store.months().await?;

    let mut monthly = Vec::with_capacity(months.len());
    for month in months {
        let range = EntryFilter::between(month.first_day(), month.last_day());
        let totals = store.totals_by_category(&range).await?;
        monthly.push((month, totals));
    }

    let report = TrendReport::build(&categories, &monthly);
    info!(
        months = report.x_label.len(),
        categories = report.category_list.len(),
        "built trend report"
    );
    Ok(report)
}
