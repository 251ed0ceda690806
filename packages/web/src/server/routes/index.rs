use axum::response::Html;

use crate::server::views::INDEX_HTML;

/// Search form
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
