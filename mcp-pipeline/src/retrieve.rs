//! Retriever: queries the document store and post-processes the hits.

use std::collections::HashSet;
use std::sync::Arc;

use rag_store::DocumentStore;
use tracing::{debug, instrument};

use crate::error::PipelineError;

/// Thin wrapper over a [`DocumentStore`] handle.
///
/// By default results pass through untouched. `top_k` (0 = unlimited) and
/// `dedup` are opt-in.
#[derive(Clone)]
pub struct Retriever {
    store: Arc<dyn DocumentStore>,
    top_k: usize,
    dedup: bool,
}

impl Retriever {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            top_k: 0,
            dedup: false,
        }
    }

    /// Caps the number of returned documents; `0` disables the cap.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Drops repeated documents, keeping the first occurrence.
    pub fn with_dedup(mut self, dedup: bool) -> Self {
        self.dedup = dedup;
        self
    }

    /// Backend name, for logs.
    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    /// Fetches documents for `query`, in store order.
    ///
    /// # Errors
    /// [`PipelineError::Store`] when the backend fails.
    #[instrument(skip_all, fields(store = self.store.name(), query_len = query.len()))]
    pub async fn retrieve(&self, query: &str) -> Result<Vec<String>, PipelineError> {
        let raw = self.store.search(query).await?;
        let fetched = raw.len();
        let docs = post_process(raw, self.top_k, self.dedup);
        debug!(fetched, kept = docs.len(), "retrieved documents");
        Ok(docs)
    }
}

fn post_process(docs: Vec<String>, top_k: usize, dedup: bool) -> Vec<String> {
    let mut docs = if dedup {
        let mut seen = HashSet::new();
        docs.into_iter().filter(|d| seen.insert(d.clone())).collect()
    } else {
        docs
    };
    if top_k > 0 {
        docs.truncate(top_k);
    }
    docs
}

#[cfg(test)]
mod tests {
    use super::*;
    use rag_store::{InMemoryStore, RagError, SearchFuture};

    struct FailingStore;

    impl DocumentStore for FailingStore {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn search<'a>(&'a self, _query: &'a str) -> SearchFuture<'a> {
            Box::pin(async { Err(RagError::Qdrant("connection refused".into())) })
        }
    }

    fn store() -> Arc<dyn DocumentStore> {
        Arc::new(InMemoryStore::from_texts([
            "valve a", "valve b", "valve a", "valve c",
        ]))
    }

    #[tokio::test]
    async fn passes_store_results_through_by_default() {
        let docs = Retriever::new(store()).retrieve("valve").await.unwrap();
        assert_eq!(docs, vec!["valve a", "valve b", "valve a", "valve c"]);
    }

    #[tokio::test]
    async fn dedup_then_cap() {
        let docs = Retriever::new(store())
            .with_dedup(true)
            .with_top_k(2)
            .retrieve("valve")
            .await
            .unwrap();
        assert_eq!(docs, vec!["valve a", "valve b"]);
    }

    #[tokio::test]
    async fn store_failure_is_propagated() {
        let err = Retriever::new(Arc::new(FailingStore))
            .retrieve("anything")
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Store(_)));
    }

    #[test]
    fn zero_top_k_means_unlimited() {
        let docs = vec!["a".to_string(), "b".to_string()];
        assert_eq!(post_process(docs, 0, false).len(), 2);
    }
}
