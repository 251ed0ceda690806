mod common;

use axum::http::StatusCode;
use common::fixtures::results_page;
use common::TestHarness;

// =============================================================================
// Unusable export directory
// =============================================================================

#[tokio::test]
async fn test_export_failure_renders_error_page() {
    let ctx = TestHarness::with_blocked_export_dir();
    ctx.serve_page("jackets", 1, &results_page("Jacket", 2, false));

    let response = ctx.search("jackets", "2").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("<h2>Something went wrong</h2>"));
    assert_eq!(response.table_rows(), 0);
    assert_eq!(ctx.exported_files(), vec!["not-a-directory".to_string()]);
}

#[tokio::test]
async fn test_health_unhealthy_when_export_dir_is_a_file() {
    let ctx = TestHarness::with_blocked_export_dir();

    let response = ctx.get("/health").await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    let json: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(json["status"], "unhealthy");
    assert_eq!(json["export_dir"]["status"], "error");
    assert_eq!(json["export_dir"]["error"], "Not a directory");
}
