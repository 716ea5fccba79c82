use scraper::{Html, Selector};
use url::Url;

use crate::models::LinkRef;

/// Collect every anchor href that is already an absolute http(s) URL, in
/// document order. Hrefs are kept verbatim; duplicates are kept.
pub fn collect_links(document: &Html) -> Vec<LinkRef> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .filter(|href| is_absolute_http(href))
        .map(LinkRef::new)
        .collect()
}

/// `true` if `href` is literally scheme-prefixed with `http://` or
/// `https://` and parses as a URL with a host.
pub fn is_absolute_http(href: &str) -> bool {
    let prefixed = ["http://", "https://"].iter().any(|scheme| {
        href.get(..scheme.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(scheme))
    });

    prefixed
        && Url::parse(href)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
            .unwrap_or(false)
}
