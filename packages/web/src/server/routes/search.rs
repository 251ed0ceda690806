//! POST /search
//!
//! Runs the scrape pipeline for the submitted query, writes the CSV export
//! when anything was found and renders the results table.

use axum::{extract::Extension, response::Html, Form};
use listing_scraper::{export_file_name, export_products, SearchRequest};
use serde::Deserialize;
use tracing::info;

use crate::server::app::AppState;
use crate::server::error::AppError;
use crate::server::views;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub query: String,
    /// Number of results wanted
    pub limit: usize,
}

/// Search handler.
///
/// A malformed `limit` is rejected by the `Form` extractor before this runs.
/// No file is written when the search finds nothing.
pub async fn search_handler(
    Extension(state): Extension<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, AppError> {
    let limit = state.clamp_limit(form.limit);
    let request = SearchRequest::new(form.query.clone(), limit);

    let outcome = state.scraper.scrape(&request).await;

    if outcome.is_empty() {
        info!(query = %form.query, "Search found no products");
        return Ok(Html(views::no_products_page(&form.query, &outcome)));
    }

    let file_name = export_file_name(&form.query);
    let export_dir = state.export_dir.clone();
    let products = outcome.products.clone();
    let name = file_name.clone();
    let path = tokio::task::spawn_blocking(move || export_products(&export_dir, &name, &products))
        .await??;

    info!(
        query = %form.query,
        products = outcome.products.len(),
        path = %path.display(),
        "Search results exported"
    );

    Ok(Html(views::results_page(
        &form.query,
        &outcome.products,
        &file_name,
    )))
}
