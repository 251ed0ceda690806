//! Application setup and server configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use listing_scraper::{FetcherConfig, HttpFetcher, ListingScraper, PageFetcher, ScrapeConfig};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::routes::{download_handler, health_handler, index_handler, search_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub scraper: Arc<ListingScraper>,
    pub export_dir: Arc<PathBuf>,
    pub max_results: usize,
}

impl AppState {
    pub fn new(scraper: ListingScraper, export_dir: impl Into<PathBuf>, max_results: usize) -> Self {
        Self {
            scraper: Arc::new(scraper),
            export_dir: Arc::new(export_dir.into()),
            max_results,
        }
    }

    /// Wire the HTTP fetcher and scraper from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut fetcher_config = FetcherConfig::default().with_user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            fetcher_config = fetcher_config.with_timeout(timeout);
        }
        let fetcher: Arc<dyn PageFetcher> =
            Arc::new(HttpFetcher::new(fetcher_config).context("Failed to create HTTP fetcher")?);

        std::fs::create_dir_all(&config.export_dir).with_context(|| {
            format!(
                "Failed to create export directory {}",
                config.export_dir.display()
            )
        })?;

        let scrape_config = ScrapeConfig::new(config.marketplace_base_url.clone())
            .with_max_pages(config.max_pages);

        Ok(Self::new(
            ListingScraper::new(fetcher, scrape_config),
            config.export_dir.clone(),
            config.max_results,
        ))
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Apply the server-side result cap to a submitted limit.
    pub fn clamp_limit(&self, requested: usize) -> usize {
        if requested > self.max_results {
            tracing::info!(
                requested,
                max_results = self.max_results,
                "Clamping requested result count"
            );
        }
        requested.min(self.max_results)
    }

    /// Path of an export file inside the export directory.
    ///
    /// Names that could point elsewhere (separators, `..`) resolve to `None`.
    pub fn export_path(&self, file_name: &str) -> Option<PathBuf> {
        let is_plain_name = !file_name.is_empty()
            && file_name != "."
            && file_name != ".."
            && !file_name.contains(['/', '\\', '\0']);

        is_plain_name.then(|| self.export_dir.join(file_name))
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/search", post(search_handler))
        .route("/download/:filename", get(download_handler))
        // Health check
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
