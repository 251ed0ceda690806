//! Marketplace listing scraper.
//!
//! Fetches a marketplace search results page, extracts product listings
//! (title, link, price, size) and writes them to CSV.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use listing_scraper::{HttpFetcher, FetcherConfig, ListingScraper, ScrapeConfig, SearchRequest};
//!
//! let fetcher = Arc::new(HttpFetcher::new(FetcherConfig::default())?);
//! let scraper = ListingScraper::new(fetcher, ScrapeConfig::default());
//! let outcome = scraper.scrape(&SearchRequest::new("jackets", 5)).await;
//! ```
//!
//! # Modules
//!
//! - [`fetchers`] - `PageFetcher` trait with HTTP and mock implementations
//! - [`parser`] - listing node location and per-field extraction
//! - [`pipeline`] - bounded multi-page search
//! - [`exporter`] - CSV export

pub mod error;
pub mod exporter;
pub mod fetchers;
pub mod parser;
pub mod pipeline;
pub mod types;

pub use error::{ExportError, FetchError};
pub use exporter::{export_file_name, export_products, CSV_HEADER};
pub use fetchers::{FetcherConfig, HttpFetcher, MockFetcher, PageFetcher};
pub use parser::{parse_listing_page, ListingFields, MissingField, ParsedPage};
pub use pipeline::ListingScraper;
pub use types::{
    Product, ScrapeConfig, ScrapeOutcome, SearchRequest, StopReason, DEFAULT_BASE_URL,
    DEFAULT_USER_AGENT, SIZE_NOT_AVAILABLE,
};
