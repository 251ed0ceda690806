//! Test harness driving the router in-process.
//!
//! Each test gets its own export directory and a `MockFetcher` standing in
//! for the marketplace.

use std::path::Path;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use grailed_web::server::{build_app, AppState};
use listing_scraper::{ListingScraper, MockFetcher, ScrapeConfig};
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tower::ServiceExt;

/// Server-side result cap used by the harness
pub const MAX_RESULTS: usize = 10;

/// Page cap used by the harness
pub const MAX_PAGES: u32 = 3;

pub struct TestHarness {
    pub fetcher: MockFetcher,
    pub export_dir: TempDir,
    scrape_config: ScrapeConfig,
    app: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new()
    }
}

impl TestHarness {
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Harness whose configured export directory is a regular file, so
    /// exports fail and `/health` reports the directory as unusable.
    pub fn with_blocked_export_dir() -> Self {
        Self::build(true)
    }

    fn build(blocked: bool) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let fetcher = MockFetcher::new();
        let export_dir = tempfile::tempdir().expect("Failed to create export dir");
        let scrape_config = ScrapeConfig::default().with_max_pages(MAX_PAGES);

        let target = if blocked {
            let file = export_dir.path().join("not-a-directory");
            std::fs::write(&file, "").expect("Failed to create blocking file");
            file
        } else {
            export_dir.path().to_path_buf()
        };

        let scraper = ListingScraper::new(Arc::new(fetcher.clone()), scrape_config.clone());
        let app = build_app(AppState::new(scraper, target, MAX_RESULTS));

        Self {
            fetcher,
            export_dir,
            scrape_config,
            app,
        }
    }

    /// URL the scraper requests for `query` on `page`.
    pub fn search_url(&self, query: &str, page: u32) -> String {
        self.scrape_config.search_url(query, page).to_string()
    }

    /// Serve `html` for the given search page.
    pub fn serve_page(&self, query: &str, page: u32, html: &str) {
        self.fetcher.add_page(&self.search_url(query, page), html);
    }

    pub fn export_path(&self) -> &Path {
        self.export_dir.path()
    }

    /// Names of files currently in the export directory.
    pub fn exported_files(&self) -> Vec<String> {
        std::fs::read_dir(self.export_path())
            .expect("Failed to read export dir")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect()
    }

    pub fn read_export(&self, file_name: &str) -> String {
        std::fs::read_to_string(self.export_path().join(file_name))
            .expect("Failed to read export file")
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::get(uri)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Submit the search form.
    pub async fn search(&self, query: &str, limit: &str) -> TestResponse {
        let form = format!(
            "query={}&limit={}",
            urlencoding::encode(query),
            urlencoding::encode(limit)
        );
        self.post_form("/search", &form).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl TestResponse {
    /// Rows in the results table.
    pub fn table_rows(&self) -> usize {
        self.body.matches("View Product").count()
    }
}
