pub mod extract;
pub mod fetcher;

pub use extract::ScraperExtractor;
pub use fetcher::ReqwestFetcher;
