use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::{Value, json};

use crate::db::models::{Category, CategoryOrder, LedgerEntry};
use crate::db::store::LedgerStore;
use crate::error::KakeiboError;
use crate::handlers::entries::ListQuery;
use crate::report::{CategoryShareReport, TrendReport, category_share_report, trend_report};
use crate::router::KakeiboState;

/// GET /api/entries -> same filters as the HTML list.
pub async fn list_entries<S: LedgerStore>(
    State(state): State<KakeiboState<S>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<LedgerEntry>>, KakeiboError> {
    let filter = query.into_filter()?;
    Ok(Json(state.store.list(&filter).await?))
}

pub async fn list_categories<S: LedgerStore>(
    State(state): State<KakeiboState<S>>,
) -> Result<Json<Vec<Category>>, KakeiboError> {
    Ok(Json(state.store.categories(CategoryOrder::Id).await?))
}

pub async fn category_share<S: LedgerStore>(
    State(state): State<KakeiboState<S>>,
) -> Result<Json<CategoryShareReport>, KakeiboError> {
    Ok(Json(category_share_report(&state.store).await?))
}

pub async fn trend<S: LedgerStore>(
    State(state): State<KakeiboState<S>>,
) -> Result<Json<TrendReport>, KakeiboError> {
    Ok(Json(trend_report(&state.store).await?))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
