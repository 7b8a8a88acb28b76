//! Completion capability shared by all providers.
//!
//! The pipeline only needs "prompt in, text out". Keeping that behind a trait
//! lets callers swap the remote backend for a test double.

use std::{future::Future, pin::Pin};

use crate::error_handler::AiLlmError;

/// Boxed future returned by [`CompletionModel::complete`].
pub type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Option<String>, AiLlmError>> + Send + 'a>>;

/// Provider interface for single-shot text completion.
///
/// `Ok(None)` means the backend answered successfully but produced no
/// completion (e.g., an empty `choices` list).
pub trait CompletionModel: Send + Sync {
    /// Model identifier, used for logs.
    fn model_id(&self) -> &str;

    /// Sends `prompt` and returns the trimmed completion text.
    fn complete<'a>(&'a self, prompt: &'a str) -> CompletionFuture<'a>;
}
