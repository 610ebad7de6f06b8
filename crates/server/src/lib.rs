//! medmatch-server library crate
//!
//! Exposes `build_app`, `config` and the service traits for integration
//! tests. The actual binary entrypoint is in `main.rs`.

pub mod ai;
pub mod config;
pub mod db;
pub mod error;
mod middleware;
mod routes;

use axum::{Extension, Router, middleware as axum_mw, routing::get};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use ai::SymptomAnalyzer;
use config::Config;

pub use middleware::request_id::REQUEST_ID_HEADER;

/// Build the full application router with all routes and middleware.
///
/// Extracted from `main()` so integration tests can construct the app
/// around fake model and directory services without binding a port.
pub fn build_app(analyzer: SymptomAnalyzer, config: &Config) -> Router {
    let metrics_routes: Router<SymptomAnalyzer> = Router::new()
        .route("/metrics", get(middleware::metrics::render))
        .layer(Extension(middleware::install_recorder()));

    // Build CORS layer
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Build application
    Router::new()
        .merge(routes::app_routes())
        .merge(metrics_routes)
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::method_not_allowed)
        .with_state(analyzer)
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(axum_mw::from_fn(middleware::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_mw::from_fn(middleware::metrics_middleware))
}
