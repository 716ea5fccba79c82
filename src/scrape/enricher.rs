use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use url::Url;

use super::fetcher::PageSource;
use super::metadata::metadata_from_markup;
use crate::models::{EnrichedLink, LinkRef, PageMetadata};

pub const DEFAULT_CONCURRENCY: usize = 5;
pub const DEFAULT_LINK_DELAY: Duration = Duration::from_millis(500);

/// How discovered links are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnrichStrategy {
    /// Up to `concurrency` links in flight at once; a finished link
    /// immediately frees its slot for the next queued one.
    #[default]
    Pool,
    /// Consecutive groups of `concurrency` links. A group starts only after
    /// every link of the previous group has settled.
    Batched,
}

impl FromStr for EnrichStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pool" => Ok(EnrichStrategy::Pool),
            "batched" | "batch" => Ok(EnrichStrategy::Batched),
            other => Err(format!("unknown enrich strategy `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnrichPolicy {
    pub concurrency: usize,
    /// Pause before every link fetch.
    pub delay: Duration,
    pub strategy: EnrichStrategy,
}

impl Default for EnrichPolicy {
    fn default() -> Self {
        EnrichPolicy {
            concurrency: DEFAULT_CONCURRENCY,
            delay: DEFAULT_LINK_DELAY,
            strategy: EnrichStrategy::default(),
        }
    }
}

/// Result of enriching one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Enriched(PageMetadata),
    Failed { reason: String },
}

impl LinkOutcome {
    /// Attach the outcome to its link. A failure keeps the link with
    /// placeholder metadata.
    pub fn into_enriched(self, link: LinkRef) -> EnrichedLink {
        match self {
            LinkOutcome::Enriched(metadata) => EnrichedLink::new(link, metadata),
            LinkOutcome::Failed { reason } => {
                tracing::warn!(url = %link.url, %reason, "Link enrichment failed, using placeholder metadata");
                EnrichedLink::placeholder(link)
            }
        }
    }
}

/// Fetches every discovered link and attaches its metadata.
///
/// Output always has the same length and order as the input, whatever the
/// completion order or failures.
#[derive(Clone)]
pub struct Enricher {
    source: Arc<dyn PageSource>,
    policy: EnrichPolicy,
}

impl Enricher {
    pub fn new(source: Arc<dyn PageSource>, mut policy: EnrichPolicy) -> Self {
        policy.concurrency = policy.concurrency.max(1);
        Enricher { source, policy }
    }

    pub fn policy(&self) -> &EnrichPolicy {
        &self.policy
    }

    pub async fn enrich(&self, links: Vec<LinkRef>) -> Vec<EnrichedLink> {
        if links.is_empty() {
            return Vec::new();
        }

        match self.policy.strategy {
            EnrichStrategy::Pool => self.enrich_pooled(links).await,
            EnrichStrategy::Batched => self.enrich_batched(links).await,
        }
    }

    async fn enrich_pooled(&self, links: Vec<LinkRef>) -> Vec<EnrichedLink> {
        let mut tagged: Vec<(usize, EnrichedLink)> = stream::iter(links.into_iter().enumerate())
            .map(|(index, link)| async move { (index, self.enrich_one(link).await) })
            .buffer_unordered(self.policy.concurrency)
            .collect()
            .await;

        tagged.sort_unstable_by_key(|(index, _)| *index);
        tagged.into_iter().map(|(_, link)| link).collect()
    }

    async fn enrich_batched(&self, links: Vec<LinkRef>) -> Vec<EnrichedLink> {
        let mut enriched = Vec::with_capacity(links.len());

        for (batch, chunk) in links.chunks(self.policy.concurrency).enumerate() {
            tracing::debug!(batch, size = chunk.len(), "Enriching link batch");
            let settled = join_all(chunk.iter().cloned().map(|link| self.enrich_one(link))).await;
            enriched.extend(settled);
        }

        enriched
    }

    pub async fn enrich_one(&self, link: LinkRef) -> EnrichedLink {
        self.resolve(&link.url).await.into_enriched(link)
    }

    async fn resolve(&self, url: &str) -> LinkOutcome {
        if !self.policy.delay.is_zero() {
            tokio::time::sleep(self.policy.delay).await;
        }

        let page_url = match Url::parse(url) {
            Ok(u) => u,
            Err(e) => {
                return LinkOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        match self.source.fetch(url).await {
            Ok(body) => LinkOutcome::Enriched(metadata_from_markup(&body, &page_url)),
            Err(e) => LinkOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}
