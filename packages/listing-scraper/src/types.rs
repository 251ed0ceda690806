//! Data types shared by the scraper pipeline, the exporter and the web layer.

use serde::Serialize;
use url::Url;

/// Placeholder written when a listing has no size.
pub const SIZE_NOT_AVAILABLE: &str = "N/A";

/// Default marketplace the scraper targets.
pub const DEFAULT_BASE_URL: &str = "https://www.grailed.com";

/// Browser-like User-Agent sent with every search page request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// One product listing extracted from a search results page.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub title: String,
    /// Absolute URL of the listing
    pub link: String,
    pub price: String,
    /// Size text, or [`SIZE_NOT_AVAILABLE`]
    pub size: String,
}

/// A single search submitted through the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    /// Maximum number of products to return across all pages
    pub limit: usize,
    /// First page to fetch (1-based)
    pub page: u32,
}

impl SearchRequest {
    /// Create a request starting at page 1.
    pub fn new(query: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            limit,
            page: 1,
        }
    }

    /// Start from a different page.
    pub fn starting_at(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}

/// Settings for [`crate::ListingScraper`].
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Marketplace root; search URLs and relative listing links resolve against it
    pub base_url: Url,
    /// Upper bound on pages fetched per search
    pub max_pages: u32,
}

impl ScrapeConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            max_pages: 5,
        }
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Build `{base}/search?q={query}&page={page}`.
    ///
    /// `search` is appended to any path already on the base URL.
    pub fn search_url(&self, query: &str, page: u32) -> Url {
        let mut url = self.base_url.clone();
        if url.cannot_be_a_base() {
            url.set_path("/search");
        } else if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("search");
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("q", query)
            .append_pair("page", &page.to_string());
        url
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self::new(Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"))
    }
}

/// Why the page loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Collected `limit` products (or `limit` was zero)
    LimitReached,
    /// Last fetched page had no next-page marker
    NoNextPage,
    /// Fetched `max_pages` pages and a next page was still advertised
    PageCap,
    /// A page could not be fetched
    FetchFailed,
}

/// Result of one search, with enough bookkeeping to tell a broken scrape
/// apart from a search that legitimately matched nothing.
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub products: Vec<Product>,
    pub pages_fetched: u32,
    /// Listing nodes present on the fetched pages, before limiting
    pub listing_nodes_seen: usize,
    /// Candidate nodes dropped because title, link or price was missing
    pub skipped_listings: usize,
    pub fetch_error: Option<String>,
    pub stop_reason: StopReason,
}

impl ScrapeOutcome {
    pub(crate) fn empty(stop_reason: StopReason) -> Self {
        Self {
            products: Vec::new(),
            pages_fetched: 0,
            listing_nodes_seen: 0,
            skipped_listings: 0,
            fetch_error: None,
            stop_reason,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Pages were fetched but none of them contained a single listing node.
    /// Usually means the marketplace changed its markup.
    pub fn looks_like_markup_drift(&self) -> bool {
        self.pages_fetched > 0 && self.listing_nodes_seen == 0
    }

    /// Listing nodes were found but every candidate was missing a field.
    pub fn all_candidates_skipped(&self) -> bool {
        self.products.is_empty() && self.skipped_listings > 0
    }
}
