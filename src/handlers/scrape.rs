use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::shared::require_url;
use crate::{
    error::AppResult,
    models::{PageContentDto, ScrapeResponse},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ScrapeQuery {
    pub url: Option<String>,
}

/// GET /scrape?url=<encoded-url>
///
/// Fetches the page, enriches every absolute outbound link with its own
/// title/description/favicon, stores the aggregate and returns it.
/// Individual link failures never fail the request.
pub async fn scrape(
    State(state): State<AppState>,
    Query(params): Query<ScrapeQuery>,
) -> AppResult<Json<ScrapeResponse>> {
    let url = require_url(params.url)?;

    let result = state.pipeline.run(&url).await?;

    let record = state.store.insert(&result).await.map_err(|e| {
        tracing::error!(error = ?e, url = %url, "Failed to persist scrape result");
        e
    })?;

    tracing::info!(id = %record.id, url = %url, links = record.links.len(), "Scrape stored");

    Ok(Json(ScrapeResponse {
        success: true,
        data: record,
    }))
}

/// GET /scrape/content?url=<encoded-url>
///
/// Returns the page's body text and absolute links. Nothing is stored.
pub async fn page_content(
    State(state): State<AppState>,
    Query(params): Query<ScrapeQuery>,
) -> AppResult<Json<PageContentDto>> {
    let url = require_url(params.url)?;
    let content = state.pipeline.content(&url).await?;
    Ok(Json(content))
}
