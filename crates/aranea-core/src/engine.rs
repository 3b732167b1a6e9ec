//! The crawl engine: a rate-paced, breadth-first traversal of the link
//! graph reachable from a single seed URL.
//!
//! The engine owns a FIFO frontier and a visited registry. Every discovered
//! link passes through [`Crawler::push`], the dedup gate: it is normalized,
//! checked against the registry, and enqueued at most once. Combined with
//! FIFO order this bounds a cyclic discovery graph to a finite number of
//! fetches and yields strict BFS visit order.

use std::collections::HashMap;

use url::Url;

use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::frontier::Frontier;
use crate::link::Link;
use crate::throttle::RateLimiter;
use crate::traits::{Fetcher, LinkExtractor};

/// Predicate deciding whether a discovered link is enqueued.
/// Evaluates to true for links that should be crawled.
pub type FilterFn = Box<dyn Fn(&Link) -> bool + Send + Sync>;

/// Callback invoked once per completed visit with the visited link and the
/// raw page content.
pub type VisitFn = Box<dyn Fn(&Link, &str) + Send + Sync>;

/// How a successful crawl run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// The frontier drained: every accepted, reachable link was visited.
    FrontierExhausted,
    /// The visit budget was hit before the frontier drained. Wins over
    /// `FrontierExhausted` when both hold on the same iteration.
    BudgetReached,
}

/// Single-seed breadth-first crawler.
///
/// Generic over its fetch and extraction seams for dependency injection.
/// The filter and visitor capabilities are installed at construction via
/// [`with_filter`](Crawler::with_filter) / [`with_visitor`](Crawler::with_visitor)
/// and are immutable once `crawl` starts.
///
/// One crawl per instance: the frontier and registry are seeded at
/// construction and not reusable across runs.
pub struct Crawler<F, E>
where
    F: Fetcher,
    E: LinkExtractor,
{
    frontier: Frontier,
    /// Normalized link -> visit completed. Presence alone means the link
    /// was enqueued; the flag flips when its visit finishes.
    visited: HashMap<Link, bool>,
    limiter: RateLimiter,
    fetcher: F,
    extractor: E,
    max_visits: usize,
    num_visits: usize,
    filter: Option<FilterFn>,
    visitor: Option<VisitFn>,
}

impl<F, E> Crawler<F, E>
where
    F: Fetcher,
    E: LinkExtractor,
{
    /// Create a crawler seeded with `seed`. Fails if the seed is not an
    /// absolute, well-formed URL.
    pub fn new(
        seed: &str,
        fetcher: F,
        extractor: E,
        config: CrawlConfig,
    ) -> Result<Self, CrawlError> {
        let seed: Url = seed.parse()?;

        let mut crawler = Self {
            frontier: Frontier::new(),
            visited: HashMap::new(),
            limiter: RateLimiter::new(config.frequency, config.burst),
            fetcher,
            extractor,
            max_visits: config.max_visits,
            num_visits: 0,
            filter: None,
            visitor: None,
        };
        crawler.push(Link::from(seed));
        Ok(crawler)
    }

    /// Install a link filter. Without one, every discovered link is
    /// accepted.
    pub fn with_filter(mut self, filter: impl Fn(&Link) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Install a visit callback. Without one, visits are silent.
    pub fn with_visitor(mut self, visitor: impl Fn(&Link, &str) + Send + Sync + 'static) -> Self {
        self.visitor = Some(Box::new(visitor));
        self
    }

    /// Number of completed visits so far.
    pub fn num_visits(&self) -> usize {
        self.num_visits
    }

    /// The dedup gate between "discovered" and "queued".
    ///
    /// Normalizes the link and enqueues it unless an equal normalized link
    /// was pushed before. Idempotent: pushing the same link any number of
    /// times equals pushing it once.
    pub fn push(&mut self, link: Link) {
        let link = link.normalized();
        if self.visited.contains_key(&link) {
            tracing::trace!(url = %link, "already discovered, skipping");
            return;
        }
        self.visited.insert(link.clone(), false);
        self.frontier.push(link);
    }

    /// Run the crawl to completion.
    ///
    /// Returns which terminal state ended the run, or the first fatal error.
    /// There is no retry and no skip-and-continue: one failed fetch aborts
    /// the whole crawl. The visit callback has already fired for every page
    /// visited before the failure.
    pub async fn crawl(&mut self) -> Result<CrawlOutcome, CrawlError> {
        while !self.frontier.is_empty() && !self.budget_reached() {
            let delay = self.limiter.reserve()?;
            if !delay.is_zero() {
                tracing::debug!(sleep_ms = %delay.as_millis(), "pacing next fetch");
                tokio::time::sleep(delay).await;
            }

            let link = self.frontier.pop()?;
            self.visit(link).await?;
        }

        let outcome = if self.budget_reached() {
            CrawlOutcome::BudgetReached
        } else {
            CrawlOutcome::FrontierExhausted
        };
        tracing::info!(?outcome, visits = self.num_visits, "crawl finished");
        Ok(outcome)
    }

    /// Visit one page: fetch, extract, filter, enqueue, notify, count.
    async fn visit(&mut self, link: Link) -> Result<(), CrawlError> {
        tracing::info!(url = %link, "visiting");
        let body = self.fetcher.fetch(&link.to_string()).await?;

        let found = self.extractor.extract_links(&link, &body);
        tracing::debug!(url = %link, found = found.len(), "extracted links");

        for candidate in found {
            let accepted = match &self.filter {
                Some(filter) => filter(&candidate),
                None => true,
            };
            if accepted {
                self.push(candidate);
            }
        }

        if let Some(visitor) = &self.visitor {
            visitor(&link, &body);
        }

        self.visited.insert(link, true);
        self.num_visits += 1;
        Ok(())
    }

    fn budget_reached(&self) -> bool {
        self.max_visits != 0 && self.num_visits >= self.max_visits
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use super::*;
    use crate::testutil::{MockExtractor, MockFetcher, SiteFetcher, make_link};

    fn fast_config() -> CrawlConfig {
        CrawlConfig::new().with_frequency(Duration::ZERO)
    }

    /// A closed 4-page site with a cycle: the seed links to /a and /b,
    /// /a links back to the seed, /b links to the seed and to an
    /// off-origin page.
    fn cycle_site() -> (SiteFetcher, MockExtractor) {
        let pages = HashMap::from([
            ("http://site.test/".to_string(), "<home>".to_string()),
            ("http://site.test/a".to_string(), "<page a>".to_string()),
            ("http://site.test/b".to_string(), "<page b>".to_string()),
        ]);
        let links = HashMap::from([
            (
                "<home>".to_string(),
                vec![
                    make_link("http://site.test/a"),
                    make_link("http://site.test/b"),
                ],
            ),
            (
                "<page a>".to_string(),
                vec![make_link("http://site.test/")],
            ),
            (
                "<page b>".to_string(),
                vec![
                    make_link("http://site.test/"),
                    make_link("http://external.test/x"),
                ],
            ),
        ]);
        (SiteFetcher::new(pages), MockExtractor::with_pages(links))
    }

    #[test]
    fn rejects_malformed_seed() {
        let result = Crawler::new(
            "http//missing-colon",
            MockFetcher::new(""),
            MockExtractor::empty(),
            fast_config(),
        );
        assert!(matches!(result, Err(CrawlError::InvalidSeed(_))));
    }

    #[tokio::test]
    async fn cyclic_site_visits_each_page_once() {
        let (site, extractor) = cycle_site();
        let counts: Arc<Mutex<HashMap<String, usize>>> = Arc::default();

        let recorded = Arc::clone(&counts);
        let mut crawler = Crawler::new(
            "http://site.test",
            site.clone(),
            extractor,
            fast_config().with_max_visits(100),
        )
        .unwrap()
        .with_filter(|link| link.to_string().starts_with("http://site.test"))
        .with_visitor(move |link, _content| {
            *recorded.lock().unwrap().entry(link.to_string()).or_insert(0) += 1;
        });

        let outcome = crawler.crawl().await.unwrap();

        assert_eq!(outcome, CrawlOutcome::FrontierExhausted);
        assert_eq!(crawler.num_visits(), 3);

        let counts = counts.lock().unwrap();
        assert_eq!(counts.len(), 3);
        for (url, count) in counts.iter() {
            assert_eq!(*count, 1, "visit count for {url} should be one");
        }
        assert!(
            !site.requests().iter().any(|u| u.contains("external.test")),
            "the off-origin page must never be fetched"
        );
    }

    #[tokio::test]
    async fn visits_follow_bfs_discovery_order() {
        let (site, extractor) = cycle_site();
        let mut crawler = Crawler::new("http://site.test", site.clone(), extractor, fast_config())
            .unwrap()
            .with_filter(|link| link.to_string().starts_with("http://site.test"));

        crawler.crawl().await.unwrap();

        assert_eq!(
            site.requests(),
            vec![
                "http://site.test/",
                "http://site.test/a",
                "http://site.test/b",
            ]
        );
    }

    #[tokio::test]
    async fn budget_of_one_means_one_visit() {
        let (site, extractor) = cycle_site();
        let calls = Arc::new(Mutex::new(0usize));

        let recorded = Arc::clone(&calls);
        let mut crawler = Crawler::new(
            "http://site.test",
            site,
            extractor,
            fast_config().with_max_visits(1),
        )
        .unwrap()
        .with_visitor(move |_link, _content| {
            *recorded.lock().unwrap() += 1;
        });

        let outcome = crawler.crawl().await.unwrap();

        assert_eq!(outcome, CrawlOutcome::BudgetReached);
        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(crawler.num_visits(), 1);
    }

    #[tokio::test]
    async fn visitor_receives_page_content() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&seen);
        let mut crawler = Crawler::new(
            "http://site.test",
            MockFetcher::new("<html>hello</html>"),
            MockExtractor::empty(),
            fast_config().with_max_visits(1),
        )
        .unwrap()
        .with_visitor(move |link, content| {
            recorded
                .lock()
                .unwrap()
                .push((link.to_string(), content.to_string()));
        });

        crawler.crawl().await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![(
                "http://site.test/".to_string(),
                "<html>hello</html>".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn without_filter_every_link_is_accepted() {
        let mut crawler = Crawler::new(
            "http://site.test",
            MockFetcher::new("ignored"),
            MockExtractor::new(vec![
                make_link("http://external.test/x"),
                make_link("/relative.html"),
            ]),
            fast_config().with_max_visits(1),
        )
        .unwrap();

        crawler.crawl().await.unwrap();

        // Seed was consumed; both discovered links were enqueued.
        assert_eq!(crawler.frontier.len(), 2);
    }

    #[tokio::test]
    async fn fetch_error_aborts_the_crawl() {
        let mut crawler = Crawler::new(
            "http://site.test",
            MockFetcher::with_error(CrawlError::Http("HTTP 500 for http://site.test/".into())),
            MockExtractor::empty(),
            fast_config(),
        )
        .unwrap();

        let err = crawler.crawl().await.unwrap_err();
        assert!(matches!(err, CrawlError::Http(_)));
        assert_eq!(crawler.num_visits(), 0);
    }

    #[tokio::test]
    async fn zero_capacity_limiter_is_fatal() {
        let mut config = fast_config();
        config.burst = 0;

        let mut crawler = Crawler::new(
            "http://site.test",
            MockFetcher::new(""),
            MockExtractor::empty(),
            config,
        )
        .unwrap();

        let err = crawler.crawl().await.unwrap_err();
        assert!(matches!(err, CrawlError::LimiterDenied));
    }

    #[test]
    fn push_dedups_normalized_variants() {
        let mut crawler = Crawler::new(
            "http://x",
            MockFetcher::new(""),
            MockExtractor::empty(),
            fast_config(),
        )
        .unwrap();

        crawler.push(make_link("http://x/p"));
        crawler.push(make_link("http://x/p/"));

        // Seed plus exactly one entry for the two equivalent pushes.
        assert_eq!(crawler.frontier.len(), 2);
    }

    #[tokio::test]
    async fn zero_frequency_runs_without_pacing_delay() {
        let (site, extractor) = cycle_site();
        let mut crawler = Crawler::new("http://site.test", site, extractor, fast_config())
            .unwrap()
            .with_filter(|link| link.to_string().starts_with("http://site.test"));

        let started = Instant::now();
        crawler.crawl().await.unwrap();

        assert_eq!(crawler.num_visits(), 3);
        assert!(
            started.elapsed() < Duration::from_millis(100),
            "crawl took {:?}",
            started.elapsed()
        );
    }
}
