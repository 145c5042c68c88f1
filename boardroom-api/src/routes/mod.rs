//! REST API Routes Module
//!
//! Includes:
//! - The single-page UI at `/`
//! - Agent endpoints (`/api/strategy`, `/api/debate`)
//! - Cumulative usage (`/api/usage`)
//! - Health check endpoints
//! - CORS support for browser-based clients

pub mod debate;
pub mod health;
pub mod page;
pub mod strategy;
pub mod usage;

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::ApiConfig;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub use debate::create_router as debate_router;
pub use health::create_router as health_router;
pub use strategy::create_router as strategy_router;
pub use usage::create_router as usage_router;

// ============================================================================
// OPENAPI ENDPOINT
// ============================================================================

/// Handler for /openapi.json endpoint.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig.
///
/// In development mode (empty origins), allows all origins.
/// Otherwise only the configured origins are allowed.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any)
    } else {
        tracing::info!("CORS: allowing origins: {:?}", config.cors_origins);
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the complete API router.
///
/// - UI at `/`
/// - Agent endpoints under `/api/*`
/// - Health checks at `/health/*`
/// - OpenAPI spec at `/openapi.json`
pub fn create_api_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config);

    Router::new()
        .route("/", get(page::index))
        .nest("/api/strategy", strategy::create_router())
        .nest("/api/debate", debate::create_router())
        .nest("/api/usage", usage::create_router())
        .nest("/health", health::create_router())
        .route("/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

