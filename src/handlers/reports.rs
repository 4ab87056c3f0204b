use axum::extract::State;
use maud::Markup;

use crate::db::store::LedgerStore;
use crate::error::KakeiboError;
use crate::report::{category_share_report, trend_report};
use crate::router::KakeiboState;
use crate::views::reports::{category_share_view, trend_view};

/// GET /reports/category-share -> pie chart of each category's share of total spend.
pub async fn category_share_page<S: LedgerStore>(
    State(state): State<KakeiboState<S>>,
) -> Result<Markup, KakeiboError> {
    let report = category_share_report(&state.store).await?;
    category_share_view(&report)
}

/// GET /reports/trend -> line chart of monthly spend per category.
pub async fn trend_page<S: LedgerStore>(
    State(state): State<KakeiboState<S>>,
) -> Result<Markup, KakeiboError> {
    let report = trend_report(&state.store).await?;
    trend_view(&report)
}
