use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::shared::validation_error;
use crate::{
    error::{AppError, AppResult},
    models::ScrapeRecord,
    state::AppState,
};

pub const DEFAULT_LIST_LIMIT: i64 = 20;

#[derive(Debug, Deserialize, Validate)]
pub struct ListScrapesQuery {
    /// Maximum number of records to return (default 20, max 100).
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<i64>,
}

/// GET /scrapes?limit=N: most recent scrapes first.
pub async fn list_scrapes(
    State(state): State<AppState>,
    Query(params): Query<ListScrapesQuery>,
) -> AppResult<Json<Vec<ScrapeRecord>>> {
    params.validate().map_err(validation_error)?;
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);

    let records = state.store.list_recent(limit).await?;
    Ok(Json(records))
}

/// GET /scrapes/:id
pub async fn get_scrape(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ScrapeRecord>> {
    state
        .store
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Scrape not found".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_optional() {
        assert!(ListScrapesQuery { limit: None }.validate().is_ok());
    }

    #[test]
    fn limit_out_of_range_is_rejected() {
        let err = ListScrapesQuery { limit: Some(500) }.validate().unwrap_err();
        let AppError::Validation(msg) = validation_error(err) else {
            panic!("expected validation error");
        };
        assert_eq!(msg, "limit must be between 1 and 100");
    }

    #[test]
    fn limit_zero_is_rejected() {
        assert!(ListScrapesQuery { limit: Some(0) }.validate().is_err());
    }
}
