use std::future::Future;

use crate::error::CrawlError;
use crate::link::Link;

/// Fetches the raw body of a page over HTTP.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, CrawlError>> + Send;
}

/// Extracts anchor targets from HTML content.
///
/// `page` is the link being visited; implementations use it for log context
/// only and never resolve hrefs against it. The returned links are in
/// document order, duplicates included; deduplication happens later, at the
/// engine's push gate. Per-link parse failures are absorbed (logged and
/// skipped) inside the implementation.
pub trait LinkExtractor: Send + Sync + Clone {
    fn extract_links(&self, page: &Link, html: &str) -> Vec<Link>;
}
