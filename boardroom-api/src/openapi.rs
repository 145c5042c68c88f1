//! OpenAPI Specification for the Boardroom API
//!
//! Generated with utoipa from the route annotations and the domain types.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::{debate, health, page, strategy, usage};

use boardroom_agents::{RenderedMessage, SpeakerTag};
use boardroom_core::{ModelUsage, TerminationReason, UsageReport};
use boardroom_llm::UsageSnapshot;

/// OpenAPI document for the Boardroom API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Boardroom API",
        version = "0.1.0",
        description = "EdTech marketing agents: a single strategist and a bounded CMO vs CEO debate",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local Development")
    ),
    tags(
        (name = "Agents", description = "Strategist replies and C-suite debates"),
        (name = "Usage", description = "Cumulative token usage and estimated cost"),
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "UI", description = "Browser front end")
    ),
    paths(
        // === Agent Routes ===
        strategy::generate_strategy,
        debate::run_debate,

        // === Usage Routes ===
        usage::usage_summary,

        // === Health Routes ===
        health::ping,
        health::liveness,
        health::readiness,

        // === UI ===
        page::index,
    ),
    components(
        schemas(
            // Errors
            ApiError,
            ErrorCode,

            // Requests and responses
            strategy::StrategyRequest,
            strategy::StrategyResponse,
            debate::DebateRequest,
            debate::DebateResponse,
            health::HealthResponse,
            health::HealthStatus,
            health::HealthDetails,

            // Domain types
            RenderedMessage,
            SpeakerTag,
            TerminationReason,
            UsageReport,
            ModelUsage,
            UsageSnapshot,
        )
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate OpenAPI spec as JSON string.
    pub fn to_json() -> Result<String, serde_json::Error> {
        let openapi = Self::openapi();
        serde_json::to_string_pretty(&openapi)
    }
}
