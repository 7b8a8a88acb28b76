//! Runtime configuration loaded from environment variables.

use std::str::FromStr;

use crate::error::PipelineError;

/// Config bag for the orchestrator. All fields have defaults via `from_env`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Max documents kept after retrieval (`0` = all).
    pub top_k: usize,
    /// Drop repeated documents before prompting.
    pub dedup: bool,
    /// Prompt size budget in UTF-8 bytes (`0` = unbounded).
    pub max_prompt_chars: usize,
}

impl PipelineConfig {
    /// Build from environment variables.
    ///
    /// - `RAG_TOP_K` (default 0)
    /// - `RAG_DEDUP` (default false)
    /// - `MAX_PROMPT_CHARS` (default 0, counted in bytes)
    ///
    /// # Errors
    /// [`PipelineError::Config`] when a value is set but malformed.
    ///
    /// # Example
    /// ```
    /// # use mcp_pipeline::PipelineConfig;
    /// # fn main() -> Result<(), mcp_pipeline::PipelineError> {
    /// let cfg = PipelineConfig::from_env()?;
    /// println!("top_k={} dedup={}", cfg.top_k, cfg.dedup);
    /// # Ok(()) }
    /// ```
    pub fn from_env() -> Result<Self, PipelineError> {
        Ok(Self {
            top_k: parse("RAG_TOP_K", 0usize)?,
            dedup: parse_bool("RAG_DEDUP", false)?,
            max_prompt_chars: parse("MAX_PROMPT_CHARS", 0usize)?,
        })
    }
}

fn env(k: &str) -> Option<String> {
    std::env::var(k)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse<T: FromStr>(k: &str, dflt: T) -> Result<T, PipelineError> {
    match env(k) {
        Some(v) => v
            .parse()
            .map_err(|_| PipelineError::Config(format!("{k} is not a valid number: {v}"))),
        None => Ok(dflt),
    }
}

fn parse_bool(k: &str, dflt: bool) -> Result<bool, PipelineError> {
    match env(k).map(|v| v.to_ascii_lowercase()) {
        None => Ok(dflt),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(PipelineError::Config(format!("{k} is not a boolean: {v}"))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_post_processing() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.top_k, 0);
        assert!(!cfg.dedup);
        assert_eq!(cfg.max_prompt_chars, 0);
    }

    #[test]
    fn unset_variables_fall_back() {
        assert_eq!(parse("MCP_PIPELINE_TEST_UNSET_NUM", 7usize).unwrap(), 7);
        assert!(parse_bool("MCP_PIPELINE_TEST_UNSET_BOOL", true).unwrap());
    }
}
