//! Mock fetcher for testing.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use url::Url;

use super::PageFetcher;
use crate::error::{FetchError, FetchResult};

/// Returns canned bodies keyed by URL and records every request.
///
/// Unknown URLs answer with an empty document, which the parser reads as a
/// page without listings.
///
/// # Example
///
/// ```rust
/// use listing_scraper::fetchers::MockFetcher;
///
/// let mock = MockFetcher::new()
///     .with_page("https://www.grailed.com/search?q=boots&page=1", "<html></html>");
/// assert_eq!(mock.call_count(), 0);
/// ```
#[derive(Default, Clone)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    failures: Arc<RwLock<HashSet<String>>>,
    fail_all: Arc<RwLock<bool>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn add_page(&self, url: &str, body: &str) {
        self.pages
            .write()
            .unwrap()
            .insert(url.to_string(), body.to_string());
    }

    /// Fail requests for `url`.
    pub fn add_failure(&self, url: &str) {
        self.failures.write().unwrap().insert(url.to_string());
    }

    /// Fail every request.
    pub fn fail_all(&self) {
        *self.fail_all.write().unwrap() = true;
    }

    pub fn with_page(self, url: &str, body: &str) -> Self {
        self.add_page(url, body);
        self
    }

    pub fn with_failure(self, url: &str) -> Self {
        self.add_failure(url);
        self
    }

    pub fn failing(self) -> Self {
        self.fail_all();
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult<String> {
        let key = url.to_string();
        self.calls.write().unwrap().push(key.clone());

        if *self.fail_all.read().unwrap() || self.failures.read().unwrap().contains(&key) {
            return Err(FetchError::Unavailable {
                url: key,
                reason: "mock failure".to_string(),
            });
        }

        Ok(self
            .pages
            .read()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
