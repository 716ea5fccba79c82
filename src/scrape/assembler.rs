use crate::models::{EnrichedLink, PageMetadata, ScrapeResult};

/// Combine the source page's metadata and its enriched links into one result.
pub fn assemble(
    source_url: impl Into<String>,
    main: PageMetadata,
    links: Vec<EnrichedLink>,
) -> ScrapeResult {
    ScrapeResult {
        source_url: source_url.into(),
        main,
        links,
    }
}
