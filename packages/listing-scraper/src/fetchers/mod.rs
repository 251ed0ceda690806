//! Page fetchers.
//!
//! - `HttpFetcher` - reqwest-backed fetcher used by the server
//! - `MockFetcher` - canned pages for tests

mod http;
mod mock;

use async_trait::async_trait;
use url::Url;

use crate::error::FetchResult;

pub use http::{FetcherConfig, HttpFetcher};
pub use mock::MockFetcher;

/// Fetches the raw body of a search results page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url` and return the response body.
    ///
    /// Non-2xx statuses are errors.
    async fn fetch(&self, url: &Url) -> FetchResult<String>;

    /// Fetcher name for logging.
    fn name(&self) -> &str;
}
