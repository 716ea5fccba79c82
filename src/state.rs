use std::sync::Arc;

use crate::scrape::ScrapePipeline;
use crate::store::ScrapeStore;

/// Shared application state passed to all handlers.
/// The store is opened once at startup and reused for every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ScrapeStore>,
    pub pipeline: ScrapePipeline,
}
