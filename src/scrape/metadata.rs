use scraper::{Html, Selector};
use url::Url;

use crate::models::{PageMetadata, NO_DESCRIPTION, NO_TITLE};

/// Extract title, description and favicon from an already parsed document.
///
/// Never fails: anything missing or unusable falls back to the placeholder
/// value for that field. The favicon is resolved against `page_url`.
pub fn extract_metadata(document: &Html, page_url: &Url) -> PageMetadata {
    let title = get_title(document).unwrap_or_else(|| NO_TITLE.to_string());

    let description =
        get_meta_name(document, "description").unwrap_or_else(|| NO_DESCRIPTION.to_string());

    let logo = get_link_href(document, "icon")
        .or_else(|| get_link_href(document, "shortcut icon"))
        .and_then(|href| page_url.join(&href).ok())
        .map(String::from);

    PageMetadata {
        title,
        description,
        logo,
    }
}

/// Parse `html` and extract its metadata.
pub fn metadata_from_markup(html: &str, page_url: &Url) -> PageMetadata {
    let document = Html::parse_document(html);
    extract_metadata(&document, page_url)
}

fn get_title(doc: &Html) -> Option<String> {
    let selector = Selector::parse("head title").ok()?;
    doc.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn get_meta_name(doc: &Html, name: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[name="{name}"]"#)).ok()?;
    doc.select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn get_link_href(doc: &Html, rel: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"link[rel="{rel}"]"#)).ok()?;
    doc.select(&selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
