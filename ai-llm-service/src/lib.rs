//! Completion model adapter for the MCP RAG pipeline.
//!
//! Sends a built prompt to a remote completion endpoint and returns the text:
//! - [`services::open_ai_service::OpenAiService`]: `POST /v1/completions`
//! - [`services::ollama_service::OllamaService`]: `POST /api/generate`
//! - [`ModelAdapter`]: picks one of the above from [`LlmModelConfig`]
//!
//! Health probes live in [`health_service`]; log formatting in [`telemetry`].

pub mod completion;
pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod model_adapter;
pub mod services;
pub mod telemetry;

pub use completion::{CompletionFuture, CompletionModel};
pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::AiLlmError;
pub use model_adapter::ModelAdapter;
