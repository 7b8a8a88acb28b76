//! GET /health: completion backend probe. Always 200; see `ok` in the body.

use std::sync::Arc;

use ai_llm_service::health_service::HealthStatus;
use axum::{Json, extract::State};

use crate::core::app_state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(state.health.check(&state.llm_config).await)
}
