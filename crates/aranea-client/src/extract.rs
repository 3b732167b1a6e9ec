use std::sync::LazyLock;

use aranea_core::link::Link;
use aranea_core::traits::LinkExtractor;
use scraper::{Html, Selector};

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector is well-formed"));

/// Anchor extraction built on the scraper crate.
///
/// Walks every `<a href>` in document order and surfaces each href exactly
/// as written in the markup, never resolved against the page, whether
/// absolute or relative. Duplicates on a page are preserved; the
/// engine's push gate dedups later. A malformed href is logged and skipped
/// without aborting extraction of the remaining anchors.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScraperExtractor;

impl ScraperExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LinkExtractor for ScraperExtractor {
    fn extract_links(&self, page: &Link, html: &str) -> Vec<Link> {
        let document = Html::parse_document(html);

        let mut links = Vec::new();
        for element in document.select(&ANCHOR) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            match Link::parse(href) {
                Ok(link) => links.push(link),
                Err(e) => {
                    tracing::warn!(page = %page, href = %href, error = %e, "skipping malformed href");
                }
            }
        }
        links
    }
}
