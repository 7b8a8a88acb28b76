//! Vector-backed document store over Qdrant.
//!
//! The query is embedded with an [`EmbeddingsProvider`], searched in the
//! configured collection, and the payload text field of each hit is returned
//! in Qdrant's score order. Hits without that field are skipped.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::config::QdrantConfig;
use crate::embed::EmbeddingsProvider;
use crate::errors::RagError;
use crate::qdrant_facade::QdrantFacade;
use crate::store::{DocumentStore, SearchFuture};

/// Qdrant collection exposed as a [`DocumentStore`].
pub struct QdrantStore {
    facade: QdrantFacade,
    embedder: Arc<dyn EmbeddingsProvider>,
    top_k: u64,
    exact: bool,
    text_field: String,
}

impl QdrantStore {
    /// Connects to Qdrant and binds the embedder used for queries.
    ///
    /// # Errors
    /// Propagates configuration and client construction errors.
    pub fn new(cfg: &QdrantConfig, embedder: Arc<dyn EmbeddingsProvider>) -> Result<Self, RagError> {
        Ok(Self {
            facade: QdrantFacade::new(cfg)?,
            embedder,
            top_k: cfg.top_k,
            exact: cfg.exact_search,
            text_field: cfg.text_field.clone(),
        })
    }

    async fn search_texts(&self, query: &str) -> Result<Vec<String>, RagError> {
        trace!("qdrant search top_k={} exact={}", self.top_k, self.exact);
        let vector = self.embedder.embed(query).await?;
        let hits = self.facade.search(vector, self.top_k, self.exact).await?;
        let texts = texts_from_hits(hits, &self.text_field);
        debug!(hits = texts.len(), "qdrant search done");
        Ok(texts)
    }
}

/// Extracts `field` from each payload, keeping hit order.
fn texts_from_hits(hits: Vec<(f32, serde_json::Value)>, field: &str) -> Vec<String> {
    hits.into_iter()
        .filter_map(|(score, payload)| {
            match payload.get(field).and_then(|v| v.as_str()) {
                Some(s) => Some(s.to_string()),
                None => {
                    warn!(score, field, "hit without text payload skipped");
                    None
                }
            }
        })
        .collect()
}

impl DocumentStore for QdrantStore {
    fn name(&self) -> &'static str {
        "qdrant"
    }

    fn search<'a>(&'a self, query: &'a str) -> SearchFuture<'a> {
        Box::pin(self.search_texts(query))
    }
}
