//! Store selection and Qdrant settings, loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::RagError;

/// Which [`DocumentStore`](crate::DocumentStore) backend to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    /// [`InMemoryStore`](crate::InMemoryStore), optionally loaded from JSONL.
    Memory,
    /// [`QdrantStore`](crate::QdrantStore).
    Qdrant,
}

impl FromStr for StoreKind {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreKind::Memory),
            "qdrant" => Ok(StoreKind::Qdrant),
            other => Err(RagError::Config(format!("unsupported STORE_KIND: {other}"))),
        }
    }
}

/// Qdrant connection and search settings.
#[derive(Clone, Debug)]
pub struct QdrantConfig {
    /// Qdrant endpoint, e.g. `http://localhost:6334`.
    pub url: String,
    /// Optional API key for Qdrant Cloud.
    pub api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Number of hits requested per query.
    pub top_k: u64,
    /// Exact search flag (false = HNSW ANN).
    pub exact_search: bool,
    /// Payload field holding the document text.
    pub text_field: String,
    /// Expected embedding dimension (checked when set).
    pub embedding_dim: Option<usize>,
}

impl QdrantConfig {
    /// Creates a config with defaults for a given endpoint and collection.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            collection: collection.into(),
            top_k: 5,
            exact_search: false,
            text_field: "text".into(),
            embedding_dim: None,
        }
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.url.trim().is_empty() {
            return Err(RagError::Config("qdrant url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(RagError::Config("collection is empty".into()));
        }
        if self.top_k == 0 {
            return Err(RagError::Config("QDRANT_TOP_K must be > 0".into()));
        }
        Ok(())
    }
}

/// Full store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub kind: StoreKind,
    /// JSONL corpus for the in-memory store (empty store when `None`).
    pub docs_jsonl: Option<PathBuf>,
    pub qdrant: QdrantConfig,
}

impl StoreConfig {
    /// Build from environment variables with defaults.
    ///
    /// - `STORE_KIND` (`memory` | `qdrant`, default `memory`)
    /// - `DOCS_JSONL`
    /// - `QDRANT_URL` (default `http://127.0.0.1:6334`), `QDRANT_API_KEY`,
    ///   `QDRANT_COLLECTION` (default `documents`), `QDRANT_TOP_K` (default 5),
    ///   `QDRANT_EXACT_SEARCH`, `QDRANT_TEXT_FIELD` (default `text`), `EMBEDDING_DIM`
    ///
    /// # Errors
    /// Returns [`RagError::Config`] for unknown kinds, malformed numbers or
    /// flags that are not `1/true/yes/on` or `0/false/no/off`.
    pub fn from_env() -> Result<Self, RagError> {
        let kind = match env_opt("STORE_KIND") {
            Some(k) => k.parse()?,
            None => StoreKind::Memory,
        };

        let qdrant = QdrantConfig {
            url: env("QDRANT_URL", "http://127.0.0.1:6334"),
            api_key: env_opt("QDRANT_API_KEY"),
            collection: env("QDRANT_COLLECTION", "documents"),
            top_k: parse("QDRANT_TOP_K")?.unwrap_or(5),
            exact_search: parse_bool("QDRANT_EXACT_SEARCH", false)?,
            text_field: env("QDRANT_TEXT_FIELD", "text"),
            embedding_dim: parse("EMBEDDING_DIM")?,
        };

        Ok(Self {
            kind,
            docs_jsonl: env_opt("DOCS_JSONL").map(PathBuf::from),
            qdrant,
        })
    }
}

fn env_opt(k: &str) -> Option<String> {
    std::env::var(k).ok().filter(|v| !v.trim().is_empty())
}

fn env(k: &str, dflt: &str) -> String {
    env_opt(k).unwrap_or_else(|| dflt.to_string())
}

fn parse<T: FromStr>(k: &str) -> Result<Option<T>, RagError> {
    match env_opt(k) {
        Some(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| RagError::Config(format!("{k} is not a valid number: {v}"))),
        None => Ok(None),
    }
}

fn parse_bool(k: &str, dflt: bool) -> Result<bool, RagError> {
    match env_opt(k) {
        Some(v) => bool_value(k, &v),
        None => Ok(dflt),
    }
}

fn bool_value(k: &str, v: &str) -> Result<bool, RagError> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(RagError::Config(format!("{k} is not a boolean: {v}"))),
    }
}
