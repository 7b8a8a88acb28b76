//! Typed error for the pipeline crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Document store failed to answer the query.
    #[error("store error: {0}")]
    Store(#[from] rag_store::RagError),

    /// Completion endpoint failed (transport, status, decode).
    #[error("model error: {0}")]
    Model(#[from] ai_llm_service::AiLlmError),

    /// Prompt builder was handed a context without a required key.
    #[error("missing context key: {0}")]
    MissingContextKey(&'static str),

    /// Model answered without any completion text.
    #[error("model returned no completion")]
    EmptyCompletion,

    /// Invalid pipeline settings.
    #[error("config error: {0}")]
    Config(String),
}
