//! Cumulative usage since process start.

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use boardroom_llm::UsageSnapshot;

use crate::state::AppState;

/// GET /api/usage - Tokens and estimated cost served so far
#[utoipa::path(
    get,
    path = "/api/usage",
    tag = "Usage",
    responses(
        (status = 200, description = "Cumulative usage", body = UsageSnapshot),
    ),
)]
pub async fn usage_summary(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.costs.snapshot())
}

pub fn create_router() -> Router<AppState> {
    Router::new().route("/", get(usage_summary))
}
