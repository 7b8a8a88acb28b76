//! Provider-dispatching model adapter.
//!
//! - Construct once from an [`LlmModelConfig`], wrap in `Arc`, share across requests.
//! - Owns exactly one HTTP client for the configured provider.
//! - Implements [`CompletionModel`] so the pipeline never sees provider details.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::{CompletionModel, ModelAdapter, config::default_config::config_completion};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let adapter = Arc::new(ModelAdapter::new(config_completion()?)?);
//! let text = adapter.complete("User: Ann\nTopic: Pumps\n\nDocuments:\n\n\nAnswer:").await?;
//! println!("{}", text.unwrap_or_default());
//! # Ok(()) }
//! ```

use tracing::info;

use crate::{
    completion::{CompletionFuture, CompletionModel},
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::AiLlmError,
    services::{ollama_service::OllamaService, open_ai_service::OpenAiService},
};

/// Completion/embedding client bound to one provider config.
#[derive(Debug)]
pub enum ModelAdapter {
    OpenAI(OpenAiService),
    Ollama(OllamaService),
}

impl ModelAdapter {
    /// Builds the provider-specific service for `cfg`.
    ///
    /// # Errors
    /// Propagates constructor errors of the selected service.
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        info!(provider = ?cfg.provider, model = %cfg.model, "creating model adapter");
        match cfg.provider {
            LlmProvider::OpenAI => Ok(Self::OpenAI(OpenAiService::new(cfg)?)),
            LlmProvider::Ollama => Ok(Self::Ollama(OllamaService::new(cfg)?)),
        }
    }

    /// Computes an embedding with the configured provider.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the request or decoding fails.
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        match self {
            Self::OpenAI(svc) => svc.embeddings(input).await,
            Self::Ollama(svc) => svc.embeddings(input).await,
        }
    }
}

impl CompletionModel for ModelAdapter {
    fn model_id(&self) -> &str {
        match self {
            Self::OpenAI(svc) => svc.model_id(),
            Self::Ollama(svc) => svc.model_id(),
        }
    }

    fn complete<'a>(&'a self, prompt: &'a str) -> CompletionFuture<'a> {
        match self {
            Self::OpenAI(svc) => svc.complete(prompt),
            Self::Ollama(svc) => svc.complete(prompt),
        }
    }
}
