use mcp_pipeline::{McpAnswer, UserInput};
use serde::{Deserialize, Serialize};

use crate::error_handler::AppError;

/// Longest accepted `user_name` / `topic`, in chars.
pub const MAX_FIELD_CHARS: usize = 512;

/// Request payload for /ask.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Caller display name.
    #[serde(alias = "UserName", alias = "userName")]
    pub user_name: String,
    /// Topic to retrieve documents for.
    #[serde(alias = "Topic")]
    pub topic: String,
}

impl AskRequest {
    /// Trim both fields and reject empty or oversized values.
    pub fn sanitize(self) -> Result<UserInput, AppError> {
        let user_name = clean("user_name", &self.user_name)?;
        let topic = clean("topic", &self.topic)?;
        Ok(UserInput::new(user_name, topic))
    }
}

fn clean(field: &str, raw: &str) -> Result<String, AppError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{field} must not be empty")));
    }
    if value.chars().count() > MAX_FIELD_CHARS {
        return Err(AppError::BadRequest(format!(
            "{field} exceeds {MAX_FIELD_CHARS} characters"
        )));
    }
    Ok(value.to_string())
}

/// Response payload for /ask.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// Final model answer (plain text).
    pub answer: String,
    /// Documents the answer was grounded on, in prompt order.
    pub documents: Vec<String>,
}

impl From<McpAnswer> for AskResponse {
    fn from(a: McpAnswer) -> Self {
        Self {
            answer: a.answer,
            documents: a.documents,
        }
    }
}
