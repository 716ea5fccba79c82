use std::sync::Arc;

use scraper::Html;
use thiserror::Error;
use tracing::info;
use url::Url;

use super::assembler::assemble;
use super::content::extract_content;
use super::enricher::{EnrichPolicy, Enricher};
use super::fetcher::{FetchError, PageSource};
use super::links::collect_links;
use super::metadata::extract_metadata;
use crate::models::{LinkRef, PageContentDto, PageMetadata, ScrapeResult};

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("{0}")]
    InvalidUrl(String),

    #[error("failed to fetch page: {0}")]
    MainFetch(#[source] FetchError),
}

/// Fetch a page, enrich every outbound link it contains, and assemble the
/// result. Persisting the result is left to the caller.
#[derive(Clone)]
pub struct ScrapePipeline {
    source: Arc<dyn PageSource>,
    enricher: Enricher,
}

impl ScrapePipeline {
    pub fn new(source: Arc<dyn PageSource>, policy: EnrichPolicy) -> Self {
        let enricher = Enricher::new(source.clone(), policy);
        ScrapePipeline { source, enricher }
    }

    pub async fn run(&self, raw_url: &str) -> Result<ScrapeResult, ScrapeError> {
        let page_url = parse_target(raw_url)?;

        info!(url = %raw_url, "Scraping page");
        let html = self
            .source
            .fetch(raw_url)
            .await
            .map_err(ScrapeError::MainFetch)?;

        let (main, discovered) = analyze(&html, &page_url);
        info!(url = %raw_url, links = discovered.len(), "Discovered outbound links");

        let links = self.enricher.enrich(discovered).await;
        let placeholders = links.iter().filter(|l| l.metadata.is_placeholder()).count();
        info!(
            url = %raw_url,
            links = links.len(),
            placeholders,
            "Link enrichment finished"
        );

        Ok(assemble(raw_url, main, links))
    }

    /// Fetch a page and return its body text and absolute links, without
    /// enrichment.
    pub async fn content(&self, raw_url: &str) -> Result<PageContentDto, ScrapeError> {
        parse_target(raw_url)?;

        let html = self
            .source
            .fetch(raw_url)
            .await
            .map_err(ScrapeError::MainFetch)?;

        let (content, links) = extract_content(&html);
        Ok(PageContentDto {
            success: true,
            url: raw_url.to_string(),
            content,
            links,
        })
    }
}

/// Validate a user-supplied target URL.
pub fn parse_target(raw_url: &str) -> Result<Url, ScrapeError> {
    let parsed =
        Url::parse(raw_url).map_err(|_| ScrapeError::InvalidUrl("Invalid URL".into()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        _ => {
            return Err(ScrapeError::InvalidUrl(
                "Only http/https URLs are supported".into(),
            ))
        }
    }

    if !parsed.has_host() {
        return Err(ScrapeError::InvalidUrl("URL has no host".into()));
    }

    Ok(parsed)
}

// The parsed document is not Send, so it must be dropped before the next await.
fn analyze(html: &str, page_url: &Url) -> (PageMetadata, Vec<LinkRef>) {
    let document = Html::parse_document(html);
    (
        extract_metadata(&document, page_url),
        collect_links(&document),
    )
}
