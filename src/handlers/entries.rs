use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::NaiveDate;
use maud::Markup;
use serde::Deserialize;
use tracing::info;

use crate::db::models::{CategoryId, CategoryOrder, EntryFilter, EntryId};
use crate::db::store::LedgerStore;
use crate::error::KakeiboError;
use crate::forms::{EntryForm, FormErrors};
use crate::router::{
    CREATE_DONE_VIEW, DELETE_DONE_VIEW, KakeiboState, NEW_ENTRY_VIEW, UPDATE_DONE_VIEW,
    edit_entry_path,
};
use crate::views::entries::{delete_view, done_view, form_view, list_view};

/// Query string of the entry list. Empty values mean "no constraint", which
/// is what an untouched filter form submits.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub category: Option<String>,
}

impl ListQuery {
    pub fn into_filter(self) -> Result<EntryFilter, KakeiboError> {
        Ok(EntryFilter {
            from: parse_param("from", self.from, |s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
            })?,
            to: parse_param("to", self.to, |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())?,
            category_id: parse_param("category", self.category, |s| {
                s.parse::<CategoryId>().ok()
            })?,
        })
    }
}

fn parse_param<T>(
    name: &str,
    raw: Option<String>,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, KakeiboError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse(s)
            .map(Some)
            .ok_or_else(|| KakeiboError::InvalidQuery(format!("invalid `{name}` parameter: {s}"))),
    }
}

/// GET /entries
pub async fn list_entries<S: LedgerStore>(
    State(state): State<KakeiboState<S>>,
    Query(query): Query<ListQuery>,
) -> Result<Markup, KakeiboError> {
    let filter = query.into_filter()?;
    let entries = state.store.list(&filter).await?;
    let categories = state.store.categories(CategoryOrder::Id).await?;
    Ok(list_view(&entries, &categories, &filter))
}

/// GET /entries/new
pub async fn new_entry_page<S: LedgerStore>(
    State(state): State<KakeiboState<S>>,
) -> Result<Markup, KakeiboError> {
    let categories = state.store.categories(CategoryOrder::Id).await?;
    Ok(form_view(
        "New entry",
        NEW_ENTRY_VIEW,
        &EntryForm::default(),
        &FormErrors::default(),
        &categories,
    ))
}

/// POST /entries/new -> redirects to the done page, or re-renders with errors.
pub async fn create_entry<S: LedgerStore>(
    State(state): State<KakeiboState<S>>,
    Form(form): Form<EntryForm>,
) -> Result<Response, KakeiboError> {
    let categories = state.store.categories(CategoryOrder::Id).await?;
    match form.validate(&categories) {
        Ok(fields) => {
            let entry = state.store.create(fields).await?;
            info!(
                id = entry.id,
                category_id = entry.category_id,
                money = entry.money,
                "created ledger entry"
            );
            Ok(Redirect::to(CREATE_DONE_VIEW).into_response())
        }
        Err(errors) => {
            info!(fields = ?errors.fields().collect::<Vec<_>>(), "rejected new entry");
            let page = form_view("New entry", NEW_ENTRY_VIEW, &form, &errors, &categories);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}

/// GET /entries/{id}/edit
pub async fn edit_entry_page<S: LedgerStore>(
    State(state): State<KakeiboState<S>>,
    Path(id): Path<EntryId>,
) -> Result<Markup, KakeiboError> {
    let entry = state.store.get(id).await?;
    let categories = state.store.categories(CategoryOrder::Id).await?;
    Ok(form_view(
        "Edit entry",
        &edit_entry_path(id),
        &EntryForm::from(&entry),
        &FormErrors::default(),
        &categories,
    ))
}

/// POST /entries/{id}/edit
pub async fn update_entry<S: LedgerStore>(
    State(state): State<KakeiboState<S>>,
    Path(id): Path<EntryId>,
    Form(form): Form<EntryForm>,
) -> Result<Response, KakeiboError> {
    // unknown ids are a 404 whether or not the submission is valid
    state.store.get(id).await?;
    let categories = state.store.categories(CategoryOrder::Id).await?;
    match form.validate(&categories) {
        Ok(fields) => {
            let entry = state.store.update(id, fields).await?;
            info!(
                id = entry.id,
                category_id = entry.category_id,
                money = entry.money,
                "updated ledger entry"
            );
            Ok(Redirect::to(UPDATE_DONE_VIEW).into_response())
        }
        Err(errors) => {
            info!(id, fields = ?errors.fields().collect::<Vec<_>>(), "rejected entry update");
            let page = form_view("Edit entry", &edit_entry_path(id), &form, &errors, &categories);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}

/// GET /entries/{id}/delete
pub async fn delete_entry_page<S: LedgerStore>(
    State(state): State<KakeiboState<S>>,
    Path(id): Path<EntryId>,
) -> Result<Markup, KakeiboError> {
    let entry = state.store.get(id).await?;
    Ok(delete_view(&entry))
}

/// POST /entries/{id}/delete
pub async fn delete_entry<S: LedgerStore>(
    State(state): State<KakeiboState<S>>,
    Path(id): Path<EntryId>,
) -> Result<Redirect, KakeiboError> {
    state.store.delete(id).await?;
    info!(id, "deleted ledger entry");
    Ok(Redirect::to(DELETE_DONE_VIEW))
}

pub async fn create_done() -> Markup {
    done_view("Entry saved", "The entry has been recorded.")
}

pub async fn update_done() -> Markup {
    done_view("Entry updated", "The entry has been updated.")
}

pub async fn delete_done() -> Markup {
    done_view("Entry deleted", "The entry has been deleted.")
}
