//! Progress reporting seam between the fill engine and its caller (typically a
//! UI or the CLI). The engine invokes the reporter from its worker thread; any
//! marshalling back onto a rendering context is the implementor's concern.

use crate::errors::RunOutcome;

/// One progress sample, emitted every Nth chunk and once at completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub current_chunk: u64,
    pub total_chunks: u64,
    pub bytes_written: u64,
    /// Rolling throughput since run start. `None` while elapsed time is too
    /// small to divide by meaningfully.
    pub speed_mbps: Option<f64>,
    /// Estimated seconds to completion; omitted whenever speed is unknown.
    pub eta_seconds: Option<u64>,
}

impl Progress {
    /// Completion ratio in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        if self.total_chunks == 0 {
            return 0.0;
        }
        self.current_chunk as f64 / self.total_chunks as f64
    }
}

/// Observer contract consumed by the engine.
///
/// Both callbacks run on the engine's worker thread, so implementations must
/// be `Send + Sync` and should return quickly; a slow reporter slows the fill.
pub trait ProgressReporter: Send + Sync {
    fn on_progress(&self, progress: Progress);
    fn on_terminal(&self, outcome: &RunOutcome);
}

/// Reporter that discards every event. Useful for tests and headless embedding.
#[derive(Debug, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn on_progress(&self, _progress: Progress) {}
    fn on_terminal(&self, _outcome: &RunOutcome) {}
}
