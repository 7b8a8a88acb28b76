use std::sync::Arc;

use ai_llm_service::config::default_config::config_completion;
use ai_llm_service::error_handler::env_opt_u32;
use ai_llm_service::{LlmModelConfig, health_service::HealthService};
use mcp_pipeline::McpOrchestrator;
use tokio::sync::Semaphore;
use tracing::info;

use crate::error_handler::AppError;

/// Default number of `/ask` requests processed at the same time.
pub const DEFAULT_MAX_INFLIGHT: usize = 16;

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Pipeline wired with the configured store and model.
    pub orchestrator: McpOrchestrator,
    /// Probe client for `/health`.
    pub health: HealthService,
    /// Completion model settings reported by `/health`.
    pub llm_config: LlmModelConfig,
    /// In-flight limiter for `/ask`; `None` disables it.
    pub limiter: Option<Arc<Semaphore>>,
}

impl AppState {
    /// Assemble state from parts. `max_inflight = 0` disables the limiter.
    pub fn new(
        orchestrator: McpOrchestrator,
        health: HealthService,
        llm_config: LlmModelConfig,
        max_inflight: usize,
    ) -> Self {
        let limiter = (max_inflight > 0).then(|| Arc::new(Semaphore::new(max_inflight)));
        Self {
            orchestrator,
            health,
            llm_config,
            limiter,
        }
    }

    /// Load shared state from environment variables.
    ///
    /// # Errors
    /// Returns [`AppError::Config`] when the pipeline, model or limiter
    /// settings are invalid.
    pub fn from_env() -> Result<Self, AppError> {
        let llm_config = config_completion().map_err(|e| AppError::Config(e.to_string()))?;
        let orchestrator = McpOrchestrator::from_env()?;
        let health = HealthService::new(Some(5)).map_err(|e| AppError::Config(e.to_string()))?;
        let max_inflight = env_opt_u32("MAX_INFLIGHT")
            .map_err(|e| AppError::Config(e.to_string()))?
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_MAX_INFLIGHT);

        info!(max_inflight, "app state ready");
        Ok(Self::new(orchestrator, health, llm_config, max_inflight))
    }
}
