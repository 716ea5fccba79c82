use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{ScrapeStore, StoreError};
use crate::models::{ScrapeRecord, ScrapeResult};

/// In-process store. Records live as long as the process.
#[derive(Debug, Default)]
pub struct MemoryScrapeStore {
    records: Mutex<Vec<ScrapeRecord>>,
}

impl MemoryScrapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("record lock poisoned".into())
}

#[async_trait]
impl ScrapeStore for MemoryScrapeStore {
    async fn insert(&self, result: &ScrapeResult) -> Result<ScrapeRecord, StoreError> {
        let record = ScrapeRecord::from_result(Uuid::new_v4(), result.clone(), Utc::now());
        self.records.lock().map_err(poisoned)?.push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ScrapeRecord>, StoreError> {
        let records = self.records.lock().map_err(poisoned)?;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<ScrapeRecord>, StoreError> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let records = self.records.lock().map_err(poisoned)?;
        Ok(records.iter().rev().take(limit).cloned().collect())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let _records = self.records.lock().map_err(poisoned)?;
        Ok(())
    }
}
