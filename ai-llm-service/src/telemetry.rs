//! Log formatting shared by the workspace binaries.

use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Target prefixes of the workspace crates, plus the audit trail target.
pub const TARGET_PREFIXES: &[&str] = &[
    "ai_llm_service",
    "rag_store",
    "mcp_pipeline",
    "api",
    "mcp_rag_backend",
    AUDIT_TARGET,
];

/// Target used for per-request audit events.
pub const AUDIT_TARGET: &str = "audit";

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Whether an event target belongs to this workspace.
pub fn is_workspace_target(target: &str) -> bool {
    TARGET_PREFIXES.iter().any(|p| target.starts_with(p))
}

/// Build a formatting layer that renders ONLY events emitted by workspace crates.
///
/// - RFC3339 UTC timestamps
/// - Compact single-line format with `file:line` and target
/// - Span close events (duration of instrumented calls)
/// - ANSI colors only when stdout is a terminal
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();
    let only_workspace = filter::filter_fn(|meta| is_workspace_target(meta.target()));

    fmt::layer()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
        .with_filter(only_workspace)
}

/// Level directive for a single crate target, e.g. `mcp_pipeline=debug`.
///
/// Returns `None` if the directive cannot be parsed.
pub fn level_directive(target: &str, level: Level) -> Option<Directive> {
    format!("{target}={}", level.as_str().to_lowercase())
        .parse()
        .ok()
}

/// Create an `EnvFilter` from `RUST_LOG` or `default`, then raise every
/// workspace crate to `level`.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    TARGET_PREFIXES
        .iter()
        .filter_map(|t| level_directive(t, level))
        .fold(base, EnvFilter::add_directive)
}
