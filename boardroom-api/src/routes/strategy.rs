//! Marketing Strategist REST Route
//!
//! One request in, one reply out from the single strategist persona.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};
use boardroom_agents::{personas, respond_with_usage};
use boardroom_core::UsageReport;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

// ============================================================================
// TYPES
// ============================================================================

/// Request body for `POST /api/strategy`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct StrategyRequest {
    /// OpenAI key for this request. Falls back to the server key when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// What to ask the strategist. The stock EdTech question when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StrategyResponse {
    pub agent: String,
    pub content: String,
    pub usage: UsageReport,
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/strategy - Ask the marketing strategist
#[utoipa::path(
    post,
    path = "/api/strategy",
    tag = "Agents",
    request_body = StrategyRequest,
    responses(
        (status = 200, description = "Strategist replied", body = StrategyResponse),
        (status = 400, description = "Invalid request or no API key", body = ApiError),
        (status = 429, description = "Provider rate limited the request", body = ApiError),
        (status = 502, description = "Provider call failed", body = ApiError),
    ),
)]
pub async fn generate_strategy(
    State(state): State<AppState>,
    Json(req): Json<StrategyRequest>,
) -> ApiResult<impl IntoResponse> {
    let model_config = state.config.model_config(req.api_key.as_deref())?;
    let strategist = personas::marketing_strategist(Arc::new(model_config))?;
    let request = req
        .request
        .unwrap_or_else(|| personas::DEFAULT_STRATEGY_REQUEST.to_string());

    let _permit = state.acquire_run_permit().await?;
    let reply = respond_with_usage(state.provider.as_ref(), &strategist, &request).await?;
    state.costs.record_report(&reply.usage);

    tracing::info!(
        agent = %reply.agent,
        cost_usd = reply.usage.total_cost_usd,
        "Strategy generated"
    );

    Ok(Json(StrategyResponse {
        agent: reply.agent,
        content: reply.content,
        usage: reply.usage,
    }))
}

/// Create the strategist router
pub fn create_router() -> Router<AppState> {
    Router::new().route("/", post(generate_strategy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_fields_are_optional() -> Result<(), serde_json::Error> {
        let req: StrategyRequest = serde_json::from_str("{}")?;
        assert!(req.api_key.is_none());
        assert!(req.request.is_none());

        let req: StrategyRequest = serde_json::from_str(r#"{"request":"Plan a launch"}"#)?;
        assert_eq!(req.request.as_deref(), Some("Plan a launch"));
        Ok(())
    }

    #[test]
    fn test_request_serialization_skips_missing_key() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&StrategyRequest::default())?;
        assert_eq!(json, "{}");
        Ok(())
    }
}
