//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests. Mocks use
//! `Arc<Mutex<_>>` for interior mutability, allowing test assertions on
//! recorded calls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::CrawlError;
use crate::link::Link;
use crate::traits::{Fetcher, LinkExtractor};

/// Parse a link literal, panicking on bad test input.
pub fn make_link(href: &str) -> Link {
    Link::parse(href).expect("test link should parse")
}

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Fetcher that replays scripted responses.
#[derive(Clone)]
pub struct MockFetcher {
    /// Queue of responses. Each call pops the first element.
    /// If empty, returns a default HTML string.
    responses: Arc<Mutex<Vec<Result<String, CrawlError>>>>,
}

impl MockFetcher {
    pub fn new(body: &str) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Ok(body.to_string())])),
        }
    }

    pub fn with_error(error: CrawlError) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Err(error)])),
        }
    }

    pub fn with_responses(responses: Vec<Result<String, CrawlError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
        }
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, CrawlError> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("<html><body>default</body></html>".to_string())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// SiteFetcher
// ---------------------------------------------------------------------------

/// In-memory site: a URL-to-body map that records every fetch and answers
/// unknown URLs with an HTTP error, standing in for a live test server.
#[derive(Clone)]
pub struct SiteFetcher {
    pages: Arc<HashMap<String, String>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl SiteFetcher {
    pub fn new(pages: HashMap<String, String>) -> Self {
        Self {
            pages: Arc::new(pages),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every URL fetched so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetcher for SiteFetcher {
    async fn fetch(&self, url: &str) -> Result<String, CrawlError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| CrawlError::Http(format!("HTTP 404 for {url}")))
    }
}

// ---------------------------------------------------------------------------
// MockExtractor
// ---------------------------------------------------------------------------

/// Extractor that returns scripted link lists.
///
/// Two modes: a content-keyed map (each page body selects its links), or a
/// queue of responses popped per call. The map wins when it has the body.
#[derive(Clone)]
pub struct MockExtractor {
    pages: Arc<HashMap<String, Vec<Link>>>,
    responses: Arc<Mutex<Vec<Vec<Link>>>>,
}

impl MockExtractor {
    /// Extractor that finds no links anywhere.
    pub fn empty() -> Self {
        Self {
            pages: Arc::new(HashMap::new()),
            responses: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Single scripted response for the first call; nothing after.
    pub fn new(links: Vec<Link>) -> Self {
        Self::with_responses(vec![links])
    }

    pub fn with_responses(responses: Vec<Vec<Link>>) -> Self {
        Self {
            pages: Arc::new(HashMap::new()),
            responses: Arc::new(Mutex::new(responses)),
        }
    }

    /// Links keyed by page body, for multi-page crawl tests.
    pub fn with_pages(pages: HashMap<String, Vec<Link>>) -> Self {
        Self {
            pages: Arc::new(pages),
            responses: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl LinkExtractor for MockExtractor {
    fn extract_links(&self, _page: &Link, html: &str) -> Vec<Link> {
        if let Some(links) = self.pages.get(html) {
            return links.clone();
        }
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Vec::new()
        } else {
            responses.remove(0)
        }
    }
}
