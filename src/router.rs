use axum::{
    Router,
    response::Redirect,
    routing::get,
};

use crate::db::models::EntryId;
use crate::db::store::LedgerStore;
use crate::handlers::{api, entries, reports};

pub const ENTRIES_VIEW: &str = "/entries";
pub const NEW_ENTRY_VIEW: &str = "/entries/new";
pub const EDIT_ENTRY_VIEW: &str = "/entries/{id}/edit";
pub const DELETE_ENTRY_VIEW: &str = "/entries/{id}/delete";
pub const CREATE_DONE_VIEW: &str = "/entries/create_done";
pub const UPDATE_DONE_VIEW: &str = "/entries/update_done";
pub const DELETE_DONE_VIEW: &str = "/entries/delete_done";
pub const CATEGORY_SHARE_VIEW: &str = "/reports/category-share";
pub const TREND_VIEW: &str = "/reports/trend";

pub fn edit_entry_path(id: EntryId) -> String {
    format!("/entries/{id}/edit")
}

pub fn delete_entry_path(id: EntryId) -> String {
    format!("/entries/{id}/delete")
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct KakeiboState<S> {
    pub store: S,
}

impl<S: LedgerStore> KakeiboState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

pub fn kakeibo_router<S: LedgerStore>(state: KakeiboState<S>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to(ENTRIES_VIEW) }))
        .route(ENTRIES_VIEW, get(entries::list_entries::<S>))
        .route(
            NEW_ENTRY_VIEW,
            get(entries::new_entry_page::<S>).post(entries::create_entry::<S>),
        )
        .route(
            EDIT_ENTRY_VIEW,
            get(entries::edit_entry_page::<S>).post(entries::update_entry::<S>),
        )
        .route(
            DELETE_ENTRY_VIEW,
            get(entries::delete_entry_page::<S>).post(entries::delete_entry::<S>),
        )
        .route(CREATE_DONE_VIEW, get(entries::create_done))
        .route(UPDATE_DONE_VIEW, get(entries::update_done))
        .route(DELETE_DONE_VIEW, get(entries::delete_done))
        .route(CATEGORY_SHARE_VIEW, get(reports::category_share_page::<S>))
        .route(TREND_VIEW, get(reports::trend_page::<S>))
        .route("/api/entries", get(api::list_entries::<S>))
        .route("/api/categories", get(api::list_categories::<S>))
        .route(
            "/api/reports/category-share",
            get(api::category_share::<S>),
        )
        .route("/api/reports/trend", get(api::trend::<S>))
        .route("/health", get(api::health))
        .with_state(state)
}
