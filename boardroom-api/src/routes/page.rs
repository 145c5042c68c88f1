//! The single-page UI, compiled into the binary.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET / - Strategist and debate tabs
#[utoipa::path(
    get,
    path = "/",
    tag = "UI",
    responses(
        (status = 200, description = "HTML page", content_type = "text/html", body = String),
    ),
)]
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
