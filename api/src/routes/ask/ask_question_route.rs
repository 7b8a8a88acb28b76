//! POST /ask: runs the MCP pipeline for one user/topic pair.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::Response};
use tracing::{info, warn};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::ask::ask_request::{AskRequest, AskResponse},
};

/// Handler: POST /ask
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/ask \
///   -H 'content-type: application/json' \
///   -d '{"user_name":"Bob","topic":"Valves"}'
/// ```
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AskRequest>,
) -> AppResult<Response> {
    let input = body.sanitize()?;

    // Held until the response is built.
    let _permit = match &state.limiter {
        Some(sem) => match sem.clone().try_acquire_owned() {
            Ok(p) => Some(p),
            Err(_) => {
                warn!("in-flight limit reached, rejecting /ask");
                return Err(AppError::TooManyRequests);
            }
        },
        None => None,
    };

    info!(topic_chars = input.topic.chars().count(), "POST /ask");
    let answer = state.orchestrator.run_detailed(&input).await?;

    Ok(ApiResponse::success(AskResponse::from(answer)).into_response_with_status(StatusCode::OK))
}
