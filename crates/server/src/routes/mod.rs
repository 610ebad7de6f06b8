mod analyze;
pub mod health;
pub mod index;

use axum::{Router, routing::{get, post}};

use crate::ai::SymptomAnalyzer;
use crate::error::AppError;

/// Build the public application routes
pub fn app_routes() -> Router<SymptomAnalyzer> {
    Router::new()
        .route("/", get(index::get))
        .route("/analyze-symptoms", post(analyze::analyze))
        .route("/health", get(health::check))
}

/// Fallback for paths no route matches
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Fallback for known paths hit with an unsupported method
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
