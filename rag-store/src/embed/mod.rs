use crate::errors::RagError;
use std::{future::Future, pin::Pin};

/// Boxed future returned by [`EmbeddingsProvider::embed`].
pub type EmbedFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<f32>, RagError>> + Send + 'a>>;

/// Provider interface for query embedding.
///
/// Async is required because real providers (Ollama, OpenAI, etc.)
/// perform HTTP requests.
pub trait EmbeddingsProvider: Send + Sync {
    /// Async embedding function.
    fn embed<'a>(&'a self, text: &'a str) -> EmbedFuture<'a>;
}

pub mod llm;
