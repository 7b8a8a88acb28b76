//! Lightweight progress reporting for the request pipeline.
//!
//! Use `NoopProgress` when nobody listens (default) and `TracingProgress`
//! to emit one debug event per stage.

use tracing::debug;

pub const PROGRESS_TARGET: &str = "mcp_pipeline::progress";

/// Minimal progress interface used inside the orchestrator.
///
/// One reporter is shared by concurrent requests, so implementations must
/// not keep per-run counters.
pub trait Progress: Send + Sync {
    /// Set known total steps (optional).
    fn set_total(&self, _n: u64) {}
    /// Advance by one step and show a short message.
    fn step(&self, _msg: &str) {}
    /// Mark the run as finished.
    fn finish(&self, _msg: &str) {}
}

/// No-op reporter for servers/headless runs.
#[derive(Default, Clone, Copy)]
pub struct NoopProgress;
impl Progress for NoopProgress {}

/// Reporter that logs each stage on [`PROGRESS_TARGET`] at debug level.
///
/// Stage events sit inside the caller's request span, which keeps
/// concurrent runs apart in the log.
#[derive(Default, Clone, Copy)]
pub struct TracingProgress;

impl Progress for TracingProgress {
    fn set_total(&self, n: u64) {
        debug!(target: PROGRESS_TARGET, total = n, "run started");
    }

    fn step(&self, msg: &str) {
        debug!(target: PROGRESS_TARGET, stage = msg, "stage");
    }

    fn finish(&self, msg: &str) {
        debug!(target: PROGRESS_TARGET, finished = true, "{msg}");
    }
}
