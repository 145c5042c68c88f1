//! C-Suite Debate REST Route
//!
//! Runs a bounded CMO vs CEO dialogue and returns the rendered transcript,
//! the CMO's reflective summary and what the run cost.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};
use boardroom_agents::{personas, render, DialogueEngine, RenderedMessage};
use boardroom_core::{TerminationReason, UsageReport};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

// ============================================================================
// TYPES
// ============================================================================

/// Request body for `POST /api/debate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DebateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// First message, spoken by the CMO. The CMO's B2B course argument when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_message: Option<String>,
    /// Message cap, opening included. The server default when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_turns: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DebateResponse {
    pub dialogue_id: Uuid,
    pub messages: Vec<RenderedMessage>,
    pub summary: String,
    pub usage: UsageReport,
    pub termination: TerminationReason,
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/debate - Run a CMO vs CEO dialogue
#[utoipa::path(
    post,
    path = "/api/debate",
    tag = "Agents",
    request_body = DebateRequest,
    responses(
        (status = 200, description = "Dialogue completed", body = DebateResponse),
        (status = 400, description = "Invalid request or no API key", body = ApiError),
        (status = 429, description = "Provider rate limited the dialogue", body = ApiError),
        (status = 502, description = "Provider call failed mid-dialogue", body = ApiError),
    ),
)]
pub async fn run_debate(
    State(state): State<AppState>,
    Json(req): Json<DebateRequest>,
) -> ApiResult<impl IntoResponse> {
    let max_turns = state.config.resolve_max_turns(req.max_turns)?;
    let model_config = state.config.model_config(req.api_key.as_deref())?;
    let (cmo, ceo) = personas::c_suite(Arc::new(model_config))?;
    let opening = req
        .opening_message
        .unwrap_or_else(|| personas::DEFAULT_OPENING_MESSAGE.to_string());

    let engine = DialogueEngine::new(Arc::clone(&state.provider));

    let _permit = state.acquire_run_permit().await?;
    let result = engine.run_dialogue(&cmo, &ceo, &opening, max_turns).await?;
    state.costs.record_report(result.usage());

    let (dialogue_id, transcript, summary, usage, termination) = result.into_parts();
    tracing::info!(
        %dialogue_id,
        turns = transcript.len(),
        ?termination,
        cost_usd = usage.total_cost_usd,
        "Debate finished"
    );

    Ok(Json(DebateResponse {
        dialogue_id,
        messages: render(&transcript),
        summary,
        usage,
        termination,
    }))
}

/// Create the debate router
pub fn create_router() -> Router<AppState> {
    Router::new().route("/", post(run_debate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() -> Result<(), serde_json::Error> {
        let req: DebateRequest = serde_json::from_str("{}")?;
        assert!(req.api_key.is_none());
        assert!(req.opening_message.is_none());
        assert!(req.max_turns.is_none());
        Ok(())
    }

    #[test]
    fn test_negative_max_turns_is_rejected_by_deserializer() {
        let parsed = serde_json::from_str::<DebateRequest>(r#"{"max_turns":-1}"#);
        assert!(parsed.is_err());
    }
}
