//! Default model configs loaded from environment variables.
//!
//! Two roles are supported:
//!
//! - **Completion** → the model that answers the built prompt
//! - **Embedding**  → the model used by vector-backed document stores
//!
//! # Environment variables
//!
//! Completion:
//! - `LLM_KIND`         = provider kind (`openai` | `ollama`, default `openai`)
//! - `LLM_ENDPOINT`     = base URL (default depends on provider)
//! - `LLM_MODEL`        = model id (default `gpt-3.5-turbo-instruct`)
//! - `LLM_TEMPERATURE`  = sampling temperature (default `0.7`)
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_API_KEY` or `OPENAI_API_KEY` = optional bearer token
//! - `LLM_TIMEOUT_SECS` = request timeout (default `60`)
//!
//! Embedding:
//! - `EMBEDDING_KIND`     = provider kind (defaults to `LLM_KIND`)
//! - `EMBEDDING_ENDPOINT` = base URL (defaults to the completion endpoint)
//! - `EMBEDDING_MODEL`    = model id (mandatory)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, env_opt, env_opt_f32, env_opt_u32, env_opt_u64, must_env},
};

/// Model identifier used when `LLM_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";

/// Sampling temperature used when `LLM_TEMPERATURE` is not set.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default base URL per provider.
pub fn default_endpoint(provider: LlmProvider) -> &'static str {
    match provider {
        LlmProvider::OpenAI => "https://api.openai.com",
        LlmProvider::Ollama => "http://localhost:11434",
    }
}

fn provider_from_env(var: &'static str) -> Result<Option<LlmProvider>, AiLlmError> {
    match env_opt(var) {
        Some(kind) => Ok(Some(kind.parse::<LlmProvider>()?)),
        None => Ok(None),
    }
}

fn api_key_from_env() -> Option<String> {
    env_opt("LLM_API_KEY").or_else(|| env_opt("OPENAI_API_KEY"))
}

/// Constructs the **completion** model config.
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`](crate::error_handler::ConfigError::UnsupportedProvider) for unknown `LLM_KIND`
/// - [`ConfigError::InvalidNumber`](crate::error_handler::ConfigError::InvalidNumber) for malformed numbers
/// - validation errors from [`LlmModelConfig::validate`]
pub fn config_completion() -> Result<LlmModelConfig, AiLlmError> {
    let provider = provider_from_env("LLM_KIND")?.unwrap_or(LlmProvider::OpenAI);
    let endpoint =
        env_opt("LLM_ENDPOINT").unwrap_or_else(|| default_endpoint(provider).to_string());
    let model = env_opt("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let temperature = env_opt_f32("LLM_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE);
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

    let cfg = LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key: api_key_from_env(),
        max_tokens,
        temperature: Some(temperature),
        top_p: None,
        timeout_secs: Some(timeout_secs),
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Constructs the **embedding** model config.
///
/// # Env
/// - `EMBEDDING_MODEL` (required)
///
/// # Defaults
/// - `temperature = None` (not sent to embedding endpoints)
/// - `timeout_secs = Some(30)`
///
/// # Errors
/// Returns [`AiLlmError::Config`] when `EMBEDDING_MODEL` is missing or other
/// values are malformed.
pub fn config_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let provider = match provider_from_env("EMBEDDING_KIND")? {
        Some(p) => p,
        None => provider_from_env("LLM_KIND")?.unwrap_or(LlmProvider::OpenAI),
    };
    let endpoint = env_opt("EMBEDDING_ENDPOINT")
        .or_else(|| env_opt("LLM_ENDPOINT"))
        .unwrap_or_else(|| default_endpoint(provider).to_string());
    let model = must_env("EMBEDDING_MODEL")?;

    let cfg = LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key: api_key_from_env(),
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: Some(30),
    };
    cfg.validate()?;
    Ok(cfg)
}
