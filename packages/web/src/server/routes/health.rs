use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    export_dir: ExportDirHealth,
}

#[derive(Serialize)]
pub struct ExportDirHealth {
    status: String,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// Checks that the export directory exists and is writable.
///
/// Returns 200 OK if healthy, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let path = state.export_dir().display().to_string();

    let export_dir = match tokio::fs::metadata(state.export_dir()).await {
        Ok(meta) if !meta.is_dir() => ExportDirHealth {
            status: "error".to_string(),
            path,
            error: Some("Not a directory".to_string()),
        },
        Ok(meta) if meta.permissions().readonly() => ExportDirHealth {
            status: "error".to_string(),
            path,
            error: Some("Directory is read-only".to_string()),
        },
        Ok(_) => ExportDirHealth {
            status: "ok".to_string(),
            path,
            error: None,
        },
        Err(e) => ExportDirHealth {
            status: "error".to_string(),
            path,
            error: Some(format!("Metadata lookup failed: {}", e)),
        },
    };

    let is_healthy = export_dir.status == "ok";

    let overall_status = if is_healthy {
        "healthy"
    } else {
        "unhealthy"
    };

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall_status.to_string(),
            export_dir,
        }),
    )
}
