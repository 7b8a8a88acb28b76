//! MCP-style request pipeline.
//!
//! One request runs four sequential stages:
//! 1. [`collect`] the caller's name and topic into a [`CollectedContext`]
//! 2. [`Retriever::retrieve`] documents for the topic from a `DocumentStore`
//! 3. [`build_prompt`] from the context and documents
//! 4. complete the prompt with a `CompletionModel`
//!
//! [`McpOrchestrator`] chains them and is the entry point for callers.
//!
//! # Example
//! ```no_run
//! # use mcp_pipeline::{McpOrchestrator, UserInput};
//! # #[tokio::main] async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let orch = McpOrchestrator::from_env()?;
//! let answer = orch.run(&UserInput::new("Bob", "Valves")).await?;
//! println!("{answer}");
//! # Ok(()) }
//! ```

mod api_types;
mod cfg;
mod collector;
mod error;
mod orchestrator;
mod progress;
mod prompt;
mod retrieve;

pub use api_types::{CollectedContext, KEY_TOPIC, KEY_USER_NAME, McpAnswer, UserInput};
pub use cfg::PipelineConfig;
pub use collector::collect;
pub use error::PipelineError;
pub use orchestrator::McpOrchestrator;
pub use progress::{NoopProgress, Progress, TracingProgress};
pub use prompt::build_prompt;
pub use retrieve::Retriever;
