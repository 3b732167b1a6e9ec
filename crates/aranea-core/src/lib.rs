pub mod config;
pub mod engine;
pub mod error;
pub mod frontier;
pub mod link;
pub mod testutil;
pub mod throttle;
pub mod traits;

pub use config::CrawlConfig;
pub use engine::{CrawlOutcome, Crawler};
pub use error::CrawlError;
pub use frontier::Frontier;
pub use link::Link;
pub use throttle::RateLimiter;
pub use traits::{Fetcher, LinkExtractor};
