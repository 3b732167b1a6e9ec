use thiserror::Error;

/// Crawl-fatal error kinds for Aranea.
///
/// Malformed hrefs discovered during extraction are not represented here:
/// they are logged and dropped at the extraction site, never propagated.
#[derive(Error, Debug)]
pub enum CrawlError {
    /// The seed URL could not be parsed. Surfaces at construction,
    /// before any crawl work begins.
    #[error("invalid seed URL: {0}")]
    InvalidSeed(#[from] url::ParseError),

    /// HTTP-level failure while visiting a page (non-2xx status,
    /// unreadable body, malformed request target).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Network/connection failure while visiting a page.
    #[error("network error: {0}")]
    Network(String),

    /// The fetch timed out.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Popped an empty frontier. The crawl loop checks emptiness before
    /// popping, so this is defensive.
    #[error("nothing to pop, the frontier is empty")]
    EmptyFrontier,

    /// The rate limiter refused a reservation (zero-capacity bucket).
    #[error("fetch denied by rate limiter")]
    LimiterDenied,
}
