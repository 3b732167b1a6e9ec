use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::CrawlError;
use crate::link::Link;

/// FIFO queue of links awaiting a visit.
///
/// Insertion order is discovery order, which is what makes the traversal
/// breadth-first. The queue locks internally so it stays safe to share if a
/// future engine parallelizes fetches; the current engine is its single
/// consumer.
pub struct Frontier {
    inner: Mutex<VecDeque<Link>>,
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(VecDeque::new()),
        }
    }

    /// Append a link at the back of the queue.
    pub fn push(&self, link: Link) {
        self.inner.lock().unwrap().push_back(link);
    }

    /// Remove and return the front link.
    pub fn pop(&self) -> Result<Link, CrawlError> {
        self.inner
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(CrawlError::EmptyFrontier)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::make_link;

    #[test]
    fn pops_in_push_order() {
        let frontier = Frontier::new();
        frontier.push(make_link("http://a.test/"));
        frontier.push(make_link("http://b.test/"));
        frontier.push(make_link("http://c.test/"));

        assert_eq!(frontier.pop().unwrap().to_string(), "http://a.test/");
        assert_eq!(frontier.pop().unwrap().to_string(), "http://b.test/");
        assert_eq!(frontier.pop().unwrap().to_string(), "http://c.test/");
    }

    #[test]
    fn pop_on_empty_fails() {
        let frontier = Frontier::new();
        assert!(matches!(frontier.pop(), Err(CrawlError::EmptyFrontier)));
    }

    #[test]
    fn is_empty_tracks_len() {
        let frontier = Frontier::new();
        assert!(frontier.is_empty());
        assert_eq!(frontier.len(), 0);

        frontier.push(make_link("http://a.test/"));
        assert!(!frontier.is_empty());
        assert_eq!(frontier.len(), 1);

        frontier.pop().unwrap();
        assert!(frontier.is_empty());
        assert_eq!(frontier.len(), 0);
    }
}
