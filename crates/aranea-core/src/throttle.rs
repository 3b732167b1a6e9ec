//! Fetch pacing for polite crawling.
//!
//! A token bucket with an interval per token and a small burst capacity.
//! The engine reserves a slot before every fetch and sleeps out the delay
//! the reservation returns, so the crawl issues at most one request per
//! `interval` against the crawled origin.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::error::CrawlError;

/// Token-bucket rate limiter.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    burst: u32,
    state: Mutex<Bucket>,
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    refreshed: Instant,
}

impl RateLimiter {
    /// One token every `interval`, holding at most `burst` tokens.
    ///
    /// A zero `interval` disables pacing; a zero `burst` denies every
    /// reservation.
    pub fn new(interval: Duration, burst: u32) -> Self {
        Self {
            interval,
            burst,
            state: Mutex::new(Bucket {
                tokens: f64::from(burst),
                refreshed: Instant::now(),
            }),
        }
    }

    /// Reserve the next fetch slot.
    ///
    /// Returns the delay the caller must wait out before fetching, or
    /// [`CrawlError::LimiterDenied`] if the bucket can never hold a token.
    pub fn reserve(&self) -> Result<Duration, CrawlError> {
        if self.burst == 0 {
            return Err(CrawlError::LimiterDenied);
        }
        if self.interval.is_zero() {
            return Ok(Duration::ZERO);
        }

        let mut bucket = self.state.lock().unwrap();
        let now = Instant::now();
        let refill = now.duration_since(bucket.refreshed).as_secs_f64() / self.interval.as_secs_f64();
        bucket.tokens = (bucket.tokens + refill).min(f64::from(self.burst));
        bucket.refreshed = now;

        // The reservation may owe a token; the debt converts to a delay.
        bucket.tokens -= 1.0;
        if bucket.tokens >= 0.0 {
            Ok(Duration::ZERO)
        } else {
            Ok(self.interval.mul_f64(-bucket.tokens))
        }
    }
}
