use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Page metadata
// ============================================================================

pub const NO_TITLE: &str = "No title found";
pub const NO_DESCRIPTION: &str = "No description available";

/// Title, description and favicon of a single fetched page.
///
/// Every field is always populated: missing values are replaced by the
/// placeholder strings above, and a missing favicon is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    /// Absolute favicon URL.
    pub logo: Option<String>,
}

impl PageMetadata {
    pub fn placeholder() -> Self {
        PageMetadata {
            title: NO_TITLE.to_string(),
            description: NO_DESCRIPTION.to_string(),
            logo: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }
}

impl Default for PageMetadata {
    fn default() -> Self {
        Self::placeholder()
    }
}

// ============================================================================
// Links
// ============================================================================

/// An outbound link discovered in a page, exactly as it appeared in the href.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    pub url: String,
}

impl LinkRef {
    pub fn new(url: impl Into<String>) -> Self {
        LinkRef { url: url.into() }
    }
}

/// A discovered link together with its own page's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedLink {
    pub url: String,
    #[serde(flatten)]
    pub metadata: PageMetadata,
}

impl EnrichedLink {
    pub fn new(link: LinkRef, metadata: PageMetadata) -> Self {
        EnrichedLink {
            url: link.url,
            metadata,
        }
    }

    pub fn placeholder(link: LinkRef) -> Self {
        Self::new(link, PageMetadata::placeholder())
    }
}

// ============================================================================
// Scrape aggregate
// ============================================================================

/// One full scrape: the source page's metadata and its enriched links in
/// discovery order. Built once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeResult {
    pub source_url: String,
    pub main: PageMetadata,
    pub links: Vec<EnrichedLink>,
}

/// A persisted scrape, as returned by the store and the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeRecord {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub description: String,
    pub logo: Option<String>,
    pub links: Vec<EnrichedLink>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScrapeRecord {
    /// Attach store-assigned identity and timestamps to a result.
    pub fn from_result(id: Uuid, result: ScrapeResult, created_at: DateTime<Utc>) -> Self {
        ScrapeRecord {
            id,
            url: result.source_url,
            title: result.main.title,
            description: result.main.description,
            logo: result.main.logo,
            links: result.links,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Body of a successful `GET /scrape`.
#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub success: bool,
    pub data: ScrapeRecord,
}

/// Body of `GET /scrape/content`: visible text and absolute links of a page.
#[derive(Debug, Clone, Serialize)]
pub struct PageContentDto {
    pub success: bool,
    pub url: String,
    pub content: String,
    pub links: Vec<String>,
}
