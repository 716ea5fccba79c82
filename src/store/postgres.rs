use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{ScrapeStore, StoreError};
use crate::db;
use crate::models::{EnrichedLink, ScrapeRecord, ScrapeResult};

/// Postgres-backed store. Links are kept as an ordered JSONB array on the
/// scrape row.
#[derive(Clone, Debug)]
pub struct PgScrapeStore {
    pool: PgPool,
}

impl PgScrapeStore {
    pub fn new(pool: PgPool) -> Self {
        PgScrapeStore { pool }
    }
}

#[derive(Debug, FromRow)]
struct ScrapeRow {
    id: Uuid,
    url: String,
    title: String,
    description: String,
    logo: Option<String>,
    links: Json<Vec<EnrichedLink>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ScrapeRow> for ScrapeRecord {
    fn from(row: ScrapeRow) -> Self {
        ScrapeRecord {
            id: row.id,
            url: row.url,
            title: row.title,
            description: row.description,
            logo: row.logo,
            links: row.links.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const RETURNING: &str = "id, url, title, description, logo, links, created_at, updated_at";

#[async_trait]
impl ScrapeStore for PgScrapeStore {
    async fn insert(&self, result: &ScrapeResult) -> Result<ScrapeRecord, StoreError> {
        let row = sqlx::query_as::<_, ScrapeRow>(&format!(
            "INSERT INTO scrapes (id, url, title, description, logo, links)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {RETURNING}"
        ))
        .bind(Uuid::new_v4())
        .bind(&result.source_url)
        .bind(&result.main.title)
        .bind(&result.main.description)
        .bind(&result.main.logo)
        .bind(Json(&result.links))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get(&self, id: Uuid) -> Result<Option<ScrapeRecord>, StoreError> {
        let row = sqlx::query_as::<_, ScrapeRow>(&format!(
            "SELECT {RETURNING} FROM scrapes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<ScrapeRecord>, StoreError> {
        let rows = sqlx::query_as::<_, ScrapeRow>(&format!(
            "SELECT {RETURNING} FROM scrapes
             ORDER BY created_at DESC, id DESC
             LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        db::health_check(&self.pool).await
    }
}
