//! Typed errors for the listing scraper.
//!
//! Uses `thiserror` so the web layer can match on failure kinds instead of
//! string-sniffing an `anyhow::Error`.

use thiserror::Error;

/// Errors that can occur while fetching a marketplace page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request could not be sent or the connection failed
    #[error("HTTP request failed for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-2xx status
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Response body could not be read as text
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Canned failure (mock fetcher)
    #[error("fetch failed for {url}: {reason}")]
    Unavailable { url: String, reason: String },
}

/// Errors that can occur while writing an export file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Filesystem error (create directory, open, canonicalize)
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for export operations.
pub type ExportResult<T> = std::result::Result<T, ExportError>;
