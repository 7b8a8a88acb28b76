//! HTTP surface of the MCP RAG backend.
//!
//! - `POST /ask`   : `{user_name, topic}` → `{answer, documents}` envelope
//! - `GET  /health`: completion backend probe

use std::{env, sync::Arc};

pub mod core;
pub mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{info, warn};

pub use crate::core::app_state::AppState;
pub use crate::error_handler::{AppError, AppResult};
pub use crate::middleware_layer::json_extractor::REQUEST_ID_HEADER;

use crate::{
    middleware_layer::json_extractor::json_error_mapper,
    routes::{ask::ask_question_route::ask, health::health_route::health},
};

/// Builds the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .route("/health", get(health))
        .fallback(|| async { AppError::NotFound })
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Reads `API_ADDRESS`, wires state from the environment and serves until Ctrl+C.
pub async fn start() -> Result<(), AppError> {
    let host_url = env::var("API_ADDRESS")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(AppError::MissingEnv("API_ADDRESS"))?;

    let state = Arc::new(AppState::from_env()?);
    let app = router(state);

    // Bind to address
    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %host_url, "API listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("API stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
