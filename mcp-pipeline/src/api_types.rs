//! Public API types re-used by external crates (e.g., the HTTP API layer).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Context key holding the caller's name.
pub const KEY_USER_NAME: &str = "UserName";
/// Context key holding the request topic (also the retrieval query).
pub const KEY_TOPIC: &str = "Topic";

/// Raw request payload.
///
/// Accepts both `snake_case` and the `UserName`/`Topic` spellings.
///
/// # Example
/// ```
/// use mcp_pipeline::UserInput;
/// let input: UserInput = serde_json::from_str(r#"{"UserName":"Alice","Topic":"Pumps"}"#).unwrap();
/// assert_eq!(input.user_name, "Alice");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    #[serde(alias = "UserName", alias = "userName")]
    pub user_name: String,
    #[serde(alias = "Topic")]
    pub topic: String,
}

impl UserInput {
    pub fn new(user_name: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            topic: topic.into(),
        }
    }
}

/// Key/value context derived from a [`UserInput`]. Ordered for stable logs.
pub type CollectedContext = BTreeMap<String, String>;

/// Final answer together with the documents that were fed to the model.
///
/// # Example
/// ```
/// use mcp_pipeline::McpAnswer;
/// let a = McpAnswer {
///     answer: "Check the valve seal.".into(),
///     documents: vec!["ValveDoc".into()],
///     prompt_chars: 64,
/// };
/// assert_eq!(a.documents.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct McpAnswer {
    pub answer: String,
    pub documents: Vec<String>,
    /// Length of the prompt sent to the model, in UTF-8 bytes.
    pub prompt_chars: usize,
}
