use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use listing_scraper::ExportError;
use thiserror::Error;

/// Handler failures that surface as a server error page
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");

        let body = format!(
            "<h2>Something went wrong</h2><p>{}</p>",
            html_escape::encode_text(&self.to_string())
        );
        (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
    }
}
