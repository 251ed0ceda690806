//! Server-rendered HTML.
//!
//! Everything interpolated from a request or a scraped page goes through
//! `html_escape` first.

use html_escape::{encode_double_quoted_attribute, encode_text};
use listing_scraper::{Product, ScrapeOutcome};

/// Static search form served at `/`
pub const INDEX_HTML: &str = include_str!("../../templates/index.html");

const PAGE_HEAD: &str = r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1, shrink-to-fit=no">
    <link href="https://stackpath.bootstrapcdn.com/bootstrap/4.5.2/css/bootstrap.min.css" rel="stylesheet">
    <title>Grailed Product Search</title>
    <style>
        body { background-color: #f8f9fa; padding: 30px; }
        .result { margin-top: 30px; }
        a { color: #343a40; font-weight: bold; }
    </style>
</head>
<body>
"#;

const PAGE_FOOT: &str = "</body>\n</html>\n";

fn page(body: &str) -> String {
    format!("{PAGE_HEAD}{body}{PAGE_FOOT}")
}

/// Results table with one row per product and a link to the export.
pub fn results_page(query: &str, products: &[Product], file_name: &str) -> String {
    let rows: String = products.iter().map(product_row).collect();
    let download_href = format!("/download/{}", urlencoding::encode(file_name));

    page(&format!(
        r#"<div class="container result">
    <h2>Search results for "{query}"</h2>
    <table class="table table-bordered">
        <thead class="thead-light">
            <tr>
                <th>Product</th>
                <th>Price</th>
                <th>Link</th>
                <th>Size</th>
            </tr>
        </thead>
        <tbody>
{rows}        </tbody>
    </table>
    <p><a href="{href}" class="btn btn-pretty">Download CSV</a></p>
    <p><a href="/">New search</a></p>
</div>
"#,
        query = encode_text(query),
        href = encode_double_quoted_attribute(&download_href),
    ))
}

fn product_row(product: &Product) -> String {
    format!(
        "            <tr><td>{}</td><td>{}</td><td><a href=\"{}\" target=\"_blank\">View Product</a></td><td>{}</td></tr>\n",
        encode_text(&product.title),
        encode_text(&product.price),
        encode_double_quoted_attribute(&product.link),
        encode_text(&product.size),
    )
}

/// Shown when a search produced nothing, with a hint when the outcome
/// shows the scrape itself went wrong.
pub fn no_products_page(query: &str, outcome: &ScrapeOutcome) -> String {
    let mut body = format!("<h2>No products found for '{}'</h2>\n", encode_text(query));
    if let Some(hint) = diagnostic(outcome) {
        body.push_str(&format!("<p class=\"text-muted\">{hint}</p>\n"));
    }
    body.push_str("<p><a href=\"/\">New search</a></p>\n");
    page(&body)
}

fn diagnostic(outcome: &ScrapeOutcome) -> Option<&'static str> {
    if outcome.fetch_error.is_some() {
        Some("The marketplace could not be reached.")
    } else if outcome.looks_like_markup_drift() {
        Some("The results page contained no listings; its layout may have changed.")
    } else if outcome.all_candidates_skipped() {
        Some("Listings were found but none had a title, link and price.")
    } else {
        None
    }
}

/// Download of a file that does not exist.
pub fn file_not_found_page(file_name: &str) -> String {
    page(&format!(
        "<h2>File {} not found.</h2>\n",
        encode_text(file_name)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_scraper::{MockFetcher, ListingScraper, ScrapeConfig, SearchRequest};
    use std::sync::Arc;

    fn product(title: &str) -> Product {
        Product {
            title: title.to_string(),
            link: "https://www.grailed.com/listings/1".to_string(),
            price: "$50".to_string(),
            size: "N/A".to_string(),
        }
    }

    async fn outcome_for(mock: MockFetcher) -> ScrapeOutcome {
        ListingScraper::new(Arc::new(mock), ScrapeConfig::default())
            .scrape(&SearchRequest::new("q", 5))
            .await
    }

    #[test]
    fn test_index_is_search_form() {
        assert!(INDEX_HTML.contains(r#"<form action="/search" method="post">"#));
        assert!(INDEX_HTML.contains(r#"name="limit" min="1" value="5""#));
    }

    #[test]
    fn test_results_page_has_one_row_per_product() {
        let html = results_page("jackets", &[product("a"), product("b")], "jackets_grailed_products.csv");

        assert_eq!(html.matches("View Product").count(), 2);
        assert!(html.contains(r#"href="/download/jackets_grailed_products.csv""#));
        assert!(html.contains("Search results for \"jackets\""));
    }

    #[test]
    fn test_results_page_escapes_scraped_text() {
        let html = results_page("q", &[product("<script>alert(1)</script>")], "q.csv");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_download_link_is_percent_encoded() {
        let html = results_page("rick owens", &[product("a")], "rick owens_grailed_products.csv");
        assert!(html.contains("/download/rick%20owens_grailed_products.csv"));
    }

    #[tokio::test]
    async fn test_no_products_hint_for_fetch_failure() {
        let outcome = outcome_for(MockFetcher::new().failing()).await;

        let html = no_products_page("boots", &outcome);
        assert!(html.contains("<h2>No products found for 'boots'</h2>"));
        assert!(html.contains("could not be reached"));
    }

    #[tokio::test]
    async fn test_no_products_hint_for_markup_drift() {
        let outcome = outcome_for(MockFetcher::new()).await;

        let html = no_products_page("boots", &outcome);
        assert!(html.contains("layout may have changed"));
    }

    #[test]
    fn test_file_not_found_message() {
        let html = file_not_found_page("missing.csv");
        assert!(html.contains("<h2>File missing.csv not found.</h2>"));
    }
}
