use scraper::{Html, Selector};

use super::links::collect_links;

/// Visible text of a page's `<body>` (trimmed) and its absolute links.
pub fn extract_content(html: &str) -> (String, Vec<String>) {
    let document = Html::parse_document(html);

    let content = Selector::parse("body")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|body| body.text().collect::<String>())
        })
        .map(|text| text.trim().to_string())
        .unwrap_or_default();

    let links = collect_links(&document)
        .into_iter()
        .map(|link| link.url)
        .collect();

    (content, links)
}
