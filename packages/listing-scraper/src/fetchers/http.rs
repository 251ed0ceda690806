//! reqwest-backed page fetcher.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::PageFetcher;
use crate::error::{FetchError, FetchResult};
use crate::types::DEFAULT_USER_AGENT;

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub user_agent: String,
    /// `None` keeps reqwest's default (no timeout)
    pub timeout: Option<Duration>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl FetcherConfig {
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Issues one GET per call with a browser-like User-Agent.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: FetcherConfig) -> FetchResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::Client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult<String> {
        debug!(url = %url, "HTTP fetch starting");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        debug!(url = %url, bytes = body.len(), "HTTP fetch complete");
        Ok(body)
    }

    fn name(&self) -> &str {
        "http"
    }
}
