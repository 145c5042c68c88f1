//! Shared application state for Axum routers.

use std::sync::Arc;
use std::time::Instant;

use boardroom_llm::{ChatProvider, CostTracker, MockChatProvider, OpenAiChatProvider};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::config::{ApiConfig, ProviderKind};
use crate::error::{ApiError, ApiResult};

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub provider: Arc<dyn ChatProvider>,
    /// Single permit: one agent interaction at a time.
    run_gate: Arc<Semaphore>,
    pub costs: Arc<CostTracker>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: ApiConfig, provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
            run_gate: Arc::new(Semaphore::new(1)),
            costs: Arc::new(CostTracker::new()),
            start_time: Instant::now(),
        }
    }

    /// State with the provider selected by `config.provider`.
    pub fn from_config(config: ApiConfig) -> Self {
        let provider: Arc<dyn ChatProvider> = match config.provider {
            ProviderKind::OpenAi => Arc::new(OpenAiChatProvider::new(
                config.openai_base_url.as_str(),
                config.requests_per_minute,
            )),
            ProviderKind::Mock => Arc::new(MockChatProvider::new()),
        };
        Self::new(config, provider)
    }

    /// Wait for the single run permit. Interactions queue behind each other.
    pub async fn acquire_run_permit(&self) -> ApiResult<OwnedSemaphorePermit> {
        Arc::clone(&self.run_gate)
            .acquire_owned()
            .await
            .map_err(|_| ApiError::service_unavailable("Server is shutting down"))
    }

    /// True while an interaction holds the permit.
    pub fn is_busy(&self) -> bool {
        self.run_gate.available_permits() == 0
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("provider", &self.provider.provider_id())
            .field("busy", &self.is_busy())
            .field("costs", &self.costs)
            .finish()
    }
}
