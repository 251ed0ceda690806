//! GET /download/:filename
//!
//! Serves a previously exported CSV as an attachment. Unknown names get a
//! "not found" page with a 200 status.

use anyhow::Context;
use axum::{
    extract::{Extension, Path},
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Response},
};
use tracing::debug;

use crate::server::app::AppState;
use crate::server::error::AppError;
use crate::server::views;

pub async fn download_handler(
    Extension(state): Extension<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let path = match state.export_path(&filename) {
        Some(path) => path,
        None => return Ok(not_found(&filename)),
    };
    let is_file = tokio::fs::metadata(&path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !is_file {
        return Ok(not_found(&filename));
    }

    let contents = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read export {}", path.display()))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, content_disposition(&filename)),
        ],
        contents,
    )
        .into_response())
}

fn not_found(filename: &str) -> Response {
    debug!(filename = %filename, "Download requested for unknown file");
    Html(views::file_not_found_page(filename)).into_response()
}

/// `attachment` disposition; non-ASCII names use the RFC 5987 form.
fn content_disposition(filename: &str) -> HeaderValue {
    let plain = filename.is_ascii() && !filename.contains(['"', '\\']);
    let value = if plain {
        format!("attachment; filename=\"{}\"", filename)
    } else {
        format!(
            "attachment; filename*=UTF-8''{}",
            urlencoding::encode(filename)
        )
    };

    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_disposition() {
        assert_eq!(
            content_disposition("jackets_grailed_products.csv"),
            "attachment; filename=\"jackets_grailed_products.csv\""
        );
    }

    #[test]
    fn test_unicode_disposition_is_encoded() {
        let value = content_disposition("café_grailed_products.csv");
        assert_eq!(
            value,
            "attachment; filename*=UTF-8''caf%C3%A9_grailed_products.csv"
        );
    }
}
