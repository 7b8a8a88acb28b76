//! Document store capability.

use std::{future::Future, pin::Pin};

use crate::errors::RagError;

/// Boxed future returned by [`DocumentStore::search`].
pub type SearchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<String>, RagError>> + Send + 'a>>;

/// Search backend queried by the retriever.
///
/// Implement this trait to plug in any corpus (vector DB, SQL, cache, ...).
/// Results are returned in the backend's own order; callers must not
/// assume ranking beyond that.
pub trait DocumentStore: Send + Sync {
    /// Short backend name for logs (e.g. `"memory"`, `"qdrant"`).
    fn name(&self) -> &'static str;

    /// Returns documents relevant to `query`, in store order.
    fn search<'a>(&'a self, query: &'a str) -> SearchFuture<'a>;
}
