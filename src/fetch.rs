//! HTTP fetching behind a small trait so the pipeline can be driven by an
//! in-memory fake in tests.
//!
//! All fetches are sequential; the aggregator awaits each round trip before
//! parsing. A bounded per-request timeout and a non-2xx status both count
//! as fetch failures, which the pagination driver treats as "abandon the
//! rest of this category".

use std::time::Duration;
use tracing::debug;

/// Errors surfaced by a fetch. The pipeline never inspects these beyond
/// logging them; any error means the same thing (give up on this URL).
pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// A thing that can fetch a page body by URL (trait to allow mocking).
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Production fetcher: a shared `reqwest` client with a custom User-Agent
/// and a hard per-request timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(HttpFetcher { client })
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(%url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
