use async_trait::async_trait;
use comicpull_model::{PullError, Result};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; comicpull/0.1)";

/// Plain HTTP GET, failing on any non-success status.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch a page and return its body as text.
    async fn get_text(&self, url: &str) -> Result<String>;

    /// Fetch a binary resource (page images).
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// [`Fetch`] backed by a single reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PullError::fetch(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PullError::fetch(url, format!("HTTP {status}")));
        }
        Ok(response)
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get_text(&self, url: &str) -> Result<String> {
        tracing::debug!(url = %url, "GET page");
        let text = self
            .get(url)
            .await?
            .text()
            .await
            .map_err(|e| PullError::fetch(url, format!("failed to read response body: {e}")))?;
        tracing::debug!(url = %url, bytes = text.len(), "Received HTML");
        Ok(text)
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url = %url, "GET file");
        let bytes = self
            .get(url)
            .await?
            .bytes()
            .await
            .map_err(|e| PullError::fetch(url, format!("failed to read response body: {e}")))?;
        Ok(bytes.to_vec())
    }
}
