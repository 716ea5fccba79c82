use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::scrape::{FetchError, ScrapeError};
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The primary target of a request could not be fetched.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

impl From<ScrapeError> for AppError {
    fn from(e: ScrapeError) -> Self {
        match e {
            ScrapeError::InvalidUrl(msg) => AppError::Validation(msg),
            ScrapeError::MainFetch(err) => AppError::Fetch(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match self {
            AppError::Store(e) => {
                tracing::error!(error = ?e, "Store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Database error" }),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::Fetch(e) => {
                tracing::error!(error = %e, "Main page fetch failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Scraping failed", "details": e.to_string() }),
                )
            }
        };

        let (status, json) = body;
        (status, Json(json)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
