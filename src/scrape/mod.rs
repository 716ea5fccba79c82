//! The scrape pipeline: fetch a page, read its metadata and outbound links,
//! enrich each link with its own page metadata, and assemble the result.

pub mod assembler;
pub mod content;
pub mod enricher;
pub mod fetcher;
pub mod links;
pub mod metadata;
pub mod pipeline;

pub use enricher::{EnrichPolicy, EnrichStrategy, Enricher, LinkOutcome};
pub use fetcher::{FetchError, HttpFetcher, PageSource};
pub use pipeline::{ScrapeError, ScrapePipeline};
