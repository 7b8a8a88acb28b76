use ai_llm_service::AiLlmError;
use ai_llm_service::error_handler::ProviderErrorKind;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mcp_pipeline::PipelineError;
use thiserror::Error;
use tracing::error;

use crate::core::http::response_envelope::ApiResponse;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("config error: {0}")]
    Config(String),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("too many requests in flight, retry later")]
    TooManyRequests,

    #[error("not found")]
    NotFound,

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingEnv(_) => StatusCode::INTERNAL_SERVER_ERROR, // startup-only
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,     // startup-only
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            AppError::NotFound => StatusCode::NOT_FOUND,

            AppError::Http { status, .. } => *status,

            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingEnv(_) => "MISSING_ENV",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::TooManyRequests => "TOO_MANY_REQUESTS",
            AppError::NotFound => "NOT_FOUND",
            AppError::Http { code, .. } => code,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.error_code(), error = %self, "request failed");
        }
        ApiResponse::<()>::error(self.error_code(), self.to_string(), Vec::new())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Convert pipeline failures to `AppError::Http` with precise status & code.
///
/// Upstream failures (store, model) are 502; anything that points at our own
/// wiring is 500. Messages never echo prompt content.
impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Store(e) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "STORE_ERROR",
                message: format!("Document store failed: {e}"),
            },
            PipelineError::Model(AiLlmError::Provider(e)) => {
                let code = match &e.kind {
                    ProviderErrorKind::HttpStatus(_) => "MODEL_HTTP_ERROR",
                    ProviderErrorKind::Decode(_) => "MODEL_DECODE_ERROR",
                    _ => "MODEL_ERROR",
                };
                AppError::Http {
                    status: StatusCode::BAD_GATEWAY,
                    code,
                    message: e.to_string(),
                }
            }
            PipelineError::Model(AiLlmError::HttpTransport(e)) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "MODEL_UNREACHABLE",
                message: format!("Completion endpoint unreachable: {e}"),
            },
            PipelineError::Model(e) => AppError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "MODEL_CONFIG_ERROR",
                message: e.to_string(),
            },
            PipelineError::EmptyCompletion => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "EMPTY_COMPLETION",
                message: "The model returned no completion.".into(),
            },
            PipelineError::MissingContextKey(key) => AppError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "PIPELINE_ERROR",
                message: format!("Request context is missing '{key}'."),
            },
            PipelineError::Config(msg) => AppError::Config(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_llm_service::error_handler::{HttpError, Provider, ProviderError};
    use rag_store::RagError;

    #[test]
    fn empty_completion_is_bad_gateway() {
        let err = AppError::from(PipelineError::EmptyCompletion);
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), "EMPTY_COMPLETION");
    }

    #[test]
    fn store_failure_is_bad_gateway() {
        let err = AppError::from(PipelineError::Store(RagError::Qdrant("down".into())));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), "STORE_ERROR");
    }

    #[test]
    fn provider_status_keeps_specific_code() {
        let kind = ProviderErrorKind::HttpStatus(HttpError {
            status: StatusCode::TOO_MANY_REQUESTS,
            url: "http://llm/v1/completions".into(),
            snippet: "slow down".into(),
        });
        let err = AppError::from(PipelineError::Model(
            ProviderError::new(Provider::OpenAI, kind).into(),
        ));
        assert_eq!(err.error_code(), "MODEL_HTTP_ERROR");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn rate_limit_maps_to_429() {
        assert_eq!(
            AppError::TooManyRequests.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}
