use std::time::Duration;

use aranea_core::error::CrawlError;
use aranea_core::traits::Fetcher;
use reqwest::Client;

/// HTTP fetcher using reqwest.
///
/// Issues one GET per page with a crawler User-Agent and a request timeout,
/// then reads the full response body as text. Transport failures and
/// non-success statuses map to distinct [`CrawlError`] variants; the engine
/// treats all of them as fatal, so no retry logic lives here.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, CrawlError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, CrawlError> {
        let timeout_secs = timeout.as_secs();
        let client = Client::builder()
            .user_agent("aranea/0.1 (web crawler)")
            .timeout(timeout)
            .build()
            .map_err(|e| CrawlError::Http(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, CrawlError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                CrawlError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                CrawlError::Network(format!("connection failed: {e}"))
            } else {
                CrawlError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Http(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| CrawlError::Http(format!("failed to read response body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn relative_target_is_an_http_error() {
        // A relative link that slips past the filter reaches the fetcher
        // as written; reqwest cannot build a request for it.
        let fetcher = ReqwestFetcher::new().unwrap();
        let err = fetcher.fetch("/relative.html").await.unwrap_err();
        assert!(matches!(err, CrawlError::Http(_)));
    }
}
