//! Boardroom API - HTTP shell for the marketing agents
//!
//! Serves the single-page UI, the strategist endpoint and the CMO vs CEO
//! debate endpoint over Axum. All agent logic lives in `boardroom-agents`;
//! this crate owns configuration, error mapping, and the process-wide
//! run gate and cost tracker.

pub mod config;
pub mod constants;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::{ApiConfig, ProviderKind};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use state::AppState;
