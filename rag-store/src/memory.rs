//! In-memory document store.
//!
//! Term matching only: a document matches when it contains at least one
//! query term (case-insensitive). Matches keep insertion order. Suitable for
//! small corpora, local runs and tests; use [`crate::QdrantStore`] for
//! semantic search.

use std::path::Path;

use tracing::{debug, trace};

use crate::errors::RagError;
use crate::io_jsonl::read_documents;
use crate::record::DocRecord;
use crate::store::{DocumentStore, SearchFuture};

/// Documents kept in memory, searched by term containment.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    docs: Vec<DocRecord>,
    // Lowercased copies of `docs[i].text`, same indices.
    folded: Vec<String>,
}

impl InMemoryStore {
    /// Creates a store over the given documents.
    pub fn new(docs: Vec<DocRecord>) -> Self {
        let folded = docs.iter().map(|d| d.text.to_lowercase()).collect();
        Self { docs, folded }
    }

    /// Creates a store from bare texts.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(DocRecord::from_text).collect())
    }

    /// Loads a store from a JSONL corpus.
    ///
    /// # Errors
    /// See [`read_documents`].
    pub fn from_jsonl(path: impl AsRef<Path>) -> Result<Self, RagError> {
        Ok(Self::new(read_documents(path)?))
    }

    /// Number of documents held.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Synchronous search used by the [`DocumentStore`] impl.
    pub fn matching(&self, query: &str) -> Vec<String> {
        let terms = query_terms(query);
        if terms.is_empty() {
            trace!("memory search: query has no terms");
            return Vec::new();
        }

        let hits: Vec<String> = self
            .folded
            .iter()
            .zip(&self.docs)
            .filter(|(folded, _)| terms.iter().any(|t| folded.contains(t.as_str())))
            .map(|(_, doc)| doc.text.clone())
            .collect();

        debug!(terms = terms.len(), hits = hits.len(), "memory search done");
        hits
    }
}

/// Splits a query into lowercase alphanumeric terms.
fn query_terms(query: &str) -> Vec<String> {
    query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl DocumentStore for InMemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn search<'a>(&'a self, query: &'a str) -> SearchFuture<'a> {
        Box::pin(async move { Ok(self.matching(query)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryStore {
        InMemoryStore::from_texts([
            "Valve seals wear out after 5k cycles.",
            "Pump impellers need balancing.",
            "Check the VALVE stem for corrosion.",
        ])
    }

    #[tokio::test]
    async fn matches_case_insensitively_in_insertion_order() {
        let hits = store().search("valve").await.unwrap();
        assert_eq!(
            hits,
            vec![
                "Valve seals wear out after 5k cycles.".to_string(),
                "Check the VALVE stem for corrosion.".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn any_term_matches() {
        let hits = store().search("pump, corrosion").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits[0].starts_with("Pump"));
    }

    #[tokio::test]
    async fn blank_query_returns_nothing() {
        assert!(store().search("  ?! ").await.unwrap().is_empty());
    }

    #[test]
    fn empty_store_reports_empty() {
        assert!(InMemoryStore::default().is_empty());
        assert_eq!(store().len(), 3);
    }
}
