//! Core data models used by the library.

use serde::{Deserialize, Serialize};

/// A document held by the in-memory store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocRecord {
    /// Optional identifier; rows without one get their line number.
    #[serde(default)]
    pub id: Option<String>,
    /// Document body returned to the pipeline.
    pub text: String,
    /// Optional origin (file, URI, etc.).
    #[serde(default)]
    pub source: Option<String>,
}

impl DocRecord {
    /// Convenience constructor for a bare text document.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            source: None,
        }
    }
}
