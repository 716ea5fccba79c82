// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    routing::get,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use linkscope_server::{
    handlers,
    models::{ScrapeRecord, ScrapeResult},
    scrape::{EnrichPolicy, EnrichStrategy, FetchError, PageSource, ScrapePipeline},
    state::AppState,
    store::{ScrapeStore, StoreError},
};

// ── Page sources ─────────────────────────────────────────────────────────────

/// What a scripted URL answers with.
#[derive(Clone)]
pub enum FakePage {
    Html(String),
    Status(u16),
    Timeout,
}

/// In-memory `PageSource` that serves scripted pages and records every fetch.
/// Unscripted URLs fail with a network error.
#[derive(Default)]
pub struct FakeSource {
    pages: HashMap<String, FakePage>,
    fetched: Mutex<Vec<String>>,
    count: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages
            .insert(url.to_string(), FakePage::Html(html.to_string()));
        self
    }

    pub fn failing(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for FakeSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.fetched.lock().unwrap().push(url.to_string());
        tokio::time::sleep(Duration::from_millis(1)).await;

        match self.pages.get(url) {
            Some(FakePage::Html(html)) => Ok(html.clone()),
            Some(FakePage::Status(code)) => Err(FetchError::Status(*code)),
            Some(FakePage::Timeout) => Err(FetchError::Timeout),
            None => Err(FetchError::Network("connection refused".into())),
        }
    }
}

// ── Stores ───────────────────────────────────────────────────────────────────

/// Store whose every operation fails, for exercising persistence errors.
pub struct FailingStore;

#[async_trait]
impl ScrapeStore for FailingStore {
    async fn insert(&self, _result: &ScrapeResult) -> Result<ScrapeRecord, StoreError> {
        Err(StoreError::Unavailable("disk full".into()))
    }

    async fn get(&self, _id: Uuid) -> Result<Option<ScrapeRecord>, StoreError> {
        Err(StoreError::Unavailable("disk full".into()))
    }

    async fn list_recent(&self, _limit: i64) -> Result<Vec<ScrapeRecord>, StoreError> {
        Err(StoreError::Unavailable("disk full".into()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("disk full".into()))
    }
}

// ── App ──────────────────────────────────────────────────────────────────────

/// Enrichment policy for tests: no inter-link delay.
pub fn test_policy() -> EnrichPolicy {
    EnrichPolicy {
        concurrency: 5,
        delay: Duration::ZERO,
        strategy: EnrichStrategy::Pool,
    }
}

/// Build the full application router wired to the given store and source.
pub fn create_test_app(store: Arc<dyn ScrapeStore>, source: Arc<dyn PageSource>) -> Router {
    let state = AppState {
        store,
        pipeline: ScrapePipeline::new(source, test_policy()),
    };
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/scrape", get(handlers::scrape::scrape))
        .route("/scrape/content", get(handlers::scrape::page_content))
        .route("/scrapes", get(handlers::scrapes::list_scrapes))
        .route("/scrapes/:id", get(handlers::scrapes::get_scrape))
        .with_state(state)
}

/// Percent-encode a target URL for use in a query string.
pub fn encode(url: &str) -> String {
    url::form_urlencoded::byte_serialize(url.as_bytes()).collect()
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

/// GET /scrape for `target`.
pub async fn scrape(app: Router, target: &str) -> (StatusCode, Value) {
    get_json(app, &format!("/scrape?url={}", encode(target))).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
