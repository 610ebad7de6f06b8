//! Prometheus metrics collection middleware
//!
//! Records `http_requests_total` (counter) and `http_request_duration_seconds`
//! (histogram) for every request, with method/route/status labels, and
//! renders them at `GET /metrics`.

use axum::{
    Extension,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Label for requests that hit a fallback
const UNMATCHED_ROUTE: &str = "unmatched";

/// Middleware that records request count and duration metrics.
///
/// Requests are labelled with the route template rather than the raw path,
/// so probing random URLs cannot blow up label cardinality.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();

    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "route" => route
    )
    .record(duration);

    response
}

/// Install the Prometheus recorder and return a handle for rendering.
///
/// Uses build_recorder() + set_global_recorder() so that repeated calls
/// (e.g. in integration tests) don't panic; the second install is
/// silently ignored and we still get a valid handle for /metrics.
pub fn install_recorder() -> PrometheusHandle {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    if metrics::set_global_recorder(recorder).is_err() {
        tracing::debug!("Metrics recorder already installed");
    }
    handle
}

/// GET /metrics - Request counters and latencies in Prometheus text format
pub async fn render(Extension(handle): Extension<PrometheusHandle>) -> String {
    handle.render()
}
