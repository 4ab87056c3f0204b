use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

use crate::db::models::EntryId;

#[derive(Debug, ThisError)]
pub enum KakeiboError {
    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Ledger entry {0} not found")]
    EntryNotFound(EntryId),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid year-month label: {0}")]
    InvalidMonth(String),
}

impl From<figment::Error> for KakeiboError {
    fn from(e: figment::Error) -> Self {
        KakeiboError::Config(Box::new(e))
    }
}

impl IntoResponse for KakeiboError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            KakeiboError::EntryNotFound(id) => {
                let status = StatusCode::NOT_FOUND;
                let body = ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: format!("Ledger entry {id} does not exist."),
                };
                (status, body)
            }
            KakeiboError::InvalidQuery(reason) => {
                let status = StatusCode::BAD_REQUEST;
                let body = ApiErrorBody {
                    code: "BAD_REQUEST".to_string(),
                    message: reason,
                };
                (status, body)
            }
            other => {
                error!(error = %other, "request failed");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                };
                (status, body)
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
