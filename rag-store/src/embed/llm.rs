//! Embedding provider backed by `ai-llm-service`.
//!
//! Delegates to [`ModelAdapter::embeddings`] and checks the vector size
//! against the collection dimension when one is configured.

use std::sync::Arc;

use ai_llm_service::ModelAdapter;
use tracing::warn;

use crate::RagError;
use crate::embed::{EmbedFuture, EmbeddingsProvider};

/// Remote embedder (OpenAI-compatible or Ollama).
#[derive(Clone)]
pub struct LlmEmbedder {
    adapter: Arc<ModelAdapter>,
    dim: Option<usize>,
}

impl LlmEmbedder {
    /// Construct a new embedder; `dim = None` skips the size check.
    pub fn new(adapter: Arc<ModelAdapter>, dim: Option<usize>) -> Self {
        Self { adapter, dim }
    }
}

impl EmbeddingsProvider for LlmEmbedder {
    fn embed<'a>(&'a self, text: &'a str) -> EmbedFuture<'a> {
        Box::pin(async move {
            let v = self.adapter.embeddings(text).await?;
            check_dim(v, self.dim)
        })
    }
}

fn check_dim(v: Vec<f32>, want: Option<usize>) -> Result<Vec<f32>, RagError> {
    match want {
        Some(want) if v.len() != want => {
            warn!(got = v.len(), want, "embedding dimension mismatch");
            Err(RagError::VectorSizeMismatch { got: v.len(), want })
        }
        _ => Ok(v),
    }
}
