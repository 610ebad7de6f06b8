//! Landing page

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET / - Serve the symptom form
pub async fn get() -> Html<&'static str> {
    Html(INDEX_HTML)
}
