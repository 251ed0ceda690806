// HTTP server setup (Axum + server-rendered HTML)
pub mod app;
pub mod error;
pub mod routes;
pub mod views;

pub use app::*;
pub use error::AppError;
