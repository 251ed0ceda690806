// Main entry point for the search server

use anyhow::{Context, Result};
use grailed_web::{
    server::{build_app, AppState},
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,grailed_web=debug,listing_scraper=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Grailed Product Search");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        marketplace = %config.marketplace_base_url,
        export_dir = %config.export_dir.display(),
        max_pages = config.max_pages,
        "Configuration loaded"
    );

    // Build application
    let state = AppState::from_config(&config)?;
    let app = build_app(state);

    // Start server
    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Search form: {}", config.form_url());
    tracing::info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    if config.open_browser {
        let url = config.form_url();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = open::that(&url) {
                tracing::warn!(url = %url, error = %e, "Failed to open browser");
            }
        });
    }

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
