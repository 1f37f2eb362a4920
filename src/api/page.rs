//! Static page and fallback routes.

use axum::{http::StatusCode, response::Html};

const INDEX_HTML: &str = include_str!("index.html");

/// GET / - The single-page blog client.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Any unknown path or method: 404 with an empty body.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
