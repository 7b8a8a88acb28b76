//! Prompt builder: fixed header, documents block, answer cue.
//!
//! Layout:
//! ```text
//! User: <UserName>
//! Topic: <Topic>
//!
//! Documents:
//! <doc 1>
//!
//! <doc 2>
//!
//! Answer:
//! ```

use crate::api_types::{CollectedContext, KEY_TOPIC, KEY_USER_NAME};
use crate::error::PipelineError;

const DOC_SEPARATOR: &str = "\n\n";
const ANSWER_CUE: &str = "\n\nAnswer:";

/// Build the final prompt from documents and collected context.
///
/// `max_bytes` bounds the whole prompt length in bytes; `0` disables it.
/// Header and answer cue are always kept whole. Documents are added in order
/// while they fit; the first one that does not is cut at a char boundary and
/// the rest are dropped.
///
/// # Errors
/// [`PipelineError::MissingContextKey`] when `UserName` or `Topic` is absent.
///
/// # Example
/// ```
/// # use mcp_pipeline::{build_prompt, collect, UserInput};
/// let ctx = collect(&UserInput::new("Alice", "Pumps"));
/// let prompt = build_prompt(&["DocA".to_string()], &ctx, 0).unwrap();
/// assert!(prompt.ends_with("DocA\n\nAnswer:"));
/// ```
pub fn build_prompt(
    docs: &[String],
    ctx: &CollectedContext,
    max_bytes: usize,
) -> Result<String, PipelineError> {
    let user = ctx
        .get(KEY_USER_NAME)
        .ok_or(PipelineError::MissingContextKey(KEY_USER_NAME))?;
    let topic = ctx
        .get(KEY_TOPIC)
        .ok_or(PipelineError::MissingContextKey(KEY_TOPIC))?;

    let header = format!("User: {user}\nTopic: {topic}\n\nDocuments:\n");
    let body = if max_bytes == 0 {
        docs.join(DOC_SEPARATOR)
    } else {
        let budget = max_bytes.saturating_sub(header.len() + ANSWER_CUE.len());
        fit_documents(docs, budget)
    };

    let mut out = String::with_capacity(header.len() + body.len() + ANSWER_CUE.len());
    out.push_str(&header);
    out.push_str(&body);
    out.push_str(ANSWER_CUE);
    Ok(out)
}

/// Joins documents into at most `budget` bytes.
fn fit_documents(docs: &[String], budget: usize) -> String {
    let mut out = String::new();
    for (i, doc) in docs.iter().enumerate() {
        let sep = if i == 0 { "" } else { DOC_SEPARATOR };
        let left = budget.saturating_sub(out.len());
        if sep.len() + doc.len() <= left {
            out.push_str(sep);
            out.push_str(doc);
            continue;
        }
        // partial doc, then stop
        let piece = safe_truncate(doc, left.saturating_sub(sep.len()));
        if !piece.is_empty() {
            out.push_str(sep);
            out.push_str(piece);
        }
        break;
    }
    out
}

fn safe_truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        s
    } else {
        let mut end = max;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        &s[..end]
    }
}
