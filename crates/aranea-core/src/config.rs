use std::time::Duration;

/// Settings for one crawl run, resolved by the caller before construction.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Maximum number of pages to visit. Zero disables the budget.
    pub max_visits: usize,

    /// Minimum interval between consecutive fetches. Zero disables pacing.
    pub frequency: Duration,

    /// Token capacity of the pacing bucket. The single-fetch-at-a-time
    /// engine uses 1; zero makes every reservation fail.
    pub burst: u32,
}

impl CrawlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_visits(mut self, max_visits: usize) -> Self {
        self.max_visits = max_visits;
        self
    }

    pub fn with_frequency(mut self, frequency: Duration) -> Self {
        self.frequency = frequency;
        self
    }
}

impl Default for CrawlConfig {
    /// Unbounded visits, one fetch every 10 seconds, burst of 1.
    fn default() -> Self {
        Self {
            max_visits: 0,
            frequency: Duration::from_secs(10),
            burst: 1,
        }
    }
}
