//! Persistence for scrape results.
//!
//! The pipeline never talks to a database directly. `main` constructs one
//! [`ScrapeStore`] at startup and hands it to the handlers through
//! [`AppState`](crate::state::AppState).

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{ScrapeRecord, ScrapeResult};

pub use memory::MemoryScrapeStore;
pub use postgres::PgScrapeStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only sink for scrape results.
#[async_trait]
pub trait ScrapeStore: Send + Sync {
    /// Persist a result, assigning it an id and timestamps.
    async fn insert(&self, result: &ScrapeResult) -> Result<ScrapeRecord, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<ScrapeRecord>, StoreError>;

    /// Most recently created records first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<ScrapeRecord>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
