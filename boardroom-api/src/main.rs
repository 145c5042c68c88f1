//! Boardroom API Server Entry Point
//!
//! Bootstraps logging and configuration, then starts the Axum HTTP server.

use axum::Router;
use boardroom_api::telemetry::{init_tracer, TelemetryConfig};
use boardroom_api::{create_api_router, ApiConfig, ApiError, ApiResult, AppState};

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::from_env();
    init_tracer(&telemetry_config)?;

    let api_config = ApiConfig::from_env()?;
    let addr = api_config.bind_addr()?;
    if !api_config.has_fallback_api_key() {
        tracing::warn!("OPENAI_API_KEY is not set; every request must carry its own api_key");
    }

    let state = AppState::from_config(api_config);
    let app: Router = create_api_router(state);

    tracing::info!(
        %addr,
        service = %telemetry_config.service_name,
        version = %telemetry_config.service_version,
        "Starting Boardroom API server"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
