//! Document stores for retrieval-augmented prompting.
//!
//! A [`DocumentStore`] maps a query string to an ordered list of document
//! texts. Two backends are provided:
//! - [`InMemoryStore`]: keyword matching over documents held in memory,
//!   optionally loaded from a JSONL dump
//! - [`QdrantStore`]: embedding search over a Qdrant collection
//!
//! [`build_store`] selects and wires a backend from [`StoreConfig`].

mod config;
mod embed;
mod errors;
mod io_jsonl;
mod memory;
mod qdrant_facade;
mod qdrant_store;
mod record;
mod store;

pub use config::{QdrantConfig, StoreConfig, StoreKind};
pub use embed::llm::LlmEmbedder;
pub use embed::{EmbedFuture, EmbeddingsProvider};
pub use errors::RagError;
pub use io_jsonl::read_documents;
pub use memory::InMemoryStore;
pub use qdrant_store::QdrantStore;
pub use record::DocRecord;
pub use store::{DocumentStore, SearchFuture};

use std::sync::Arc;

use ai_llm_service::ModelAdapter;
use ai_llm_service::config::default_config::config_embedding;
use tracing::{debug, info, trace};

/// Builds the configured store.
///
/// The Qdrant backend embeds queries through `ai-llm-service`, configured by
/// the `EMBEDDING_*` variables.
///
/// # Errors
/// Returns I/O and parse errors for the JSONL corpus, configuration errors for
/// the embedding model, or Qdrant client errors.
pub fn build_store(cfg: &StoreConfig) -> Result<Arc<dyn DocumentStore>, RagError> {
    trace!("build_store kind={:?}", cfg.kind);
    match cfg.kind {
        StoreKind::Memory => {
            let store = match &cfg.docs_jsonl {
                Some(path) => InMemoryStore::from_jsonl(path)?,
                None => InMemoryStore::new(Vec::new()),
            };
            info!(docs = store.len(), "in-memory store ready");
            Ok(Arc::new(store))
        }
        StoreKind::Qdrant => {
            let embed_cfg = config_embedding()?;
            debug!(model = %embed_cfg.model, "embedding model for qdrant queries");
            let adapter = Arc::new(ModelAdapter::new(embed_cfg)?);
            let embedder = Arc::new(LlmEmbedder::new(adapter, cfg.qdrant.embedding_dim));
            let store = QdrantStore::new(&cfg.qdrant, embedder)?;
            info!(collection = %cfg.qdrant.collection, "qdrant store ready");
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn memory_cfg(docs_jsonl: Option<std::path::PathBuf>) -> StoreConfig {
        StoreConfig {
            kind: StoreKind::Memory,
            docs_jsonl,
            qdrant: QdrantConfig::new_default("http://127.0.0.1:6334", "documents"),
        }
    }

    #[tokio::test]
    async fn memory_store_without_corpus_is_empty() {
        let store = build_store(&memory_cfg(None)).expect("store");
        assert_eq!(store.name(), "memory");
        assert!(store.search("pumps").await.expect("search").is_empty());
    }

    #[tokio::test]
    async fn memory_store_loads_jsonl() {
        let mut f = tempfile::NamedTempFile::new().expect("tmp");
        writeln!(f, r#"{{"text":"Pumps need priming."}}"#).expect("write");
        writeln!(f, r#"{{"text":"Valves leak at the seal."}}"#).expect("write");

        let store = build_store(&memory_cfg(Some(f.path().to_path_buf()))).expect("store");
        let hits = store.search("valves").await.expect("search");
        assert_eq!(hits, vec!["Valves leak at the seal."]);
    }

    #[test]
    fn missing_corpus_file_is_an_error() {
        let cfg = memory_cfg(Some("/nonexistent/docs.jsonl".into()));
        assert!(matches!(build_store(&cfg), Err(RagError::Io(_))));
    }
}
