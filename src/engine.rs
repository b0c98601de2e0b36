//! Fill engine.
//! Owns the chunked write loop: creates filler files sequentially, polls the
//! cancellation token at chunk granularity, keeps cumulative byte/chunk
//! counters, and emits throughput/ETA progress events to the reporter.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::errors::{FillError, RunOutcome};
use crate::plan::{FillPlan, FillTarget, filler_path};
use crate::progress::{Progress, ProgressReporter};

const MIB: f64 = 1024.0 * 1024.0;
/// Below this elapsed time a speed sample would be mostly noise; the engine
/// emits the progress event without speed/ETA instead.
const MIN_ELAPSED_SECS: f64 = 0.05;

/// Mutable run bookkeeping, owned exclusively by the worker for the duration
/// of one run and discarded afterwards. Observed only via reporter callbacks.
struct RunState {
    current_chunk: u64,
    total_bytes_written: u64,
    started: Instant,
}

/// Executes one fill plan. One engine instance drives at most one run.
pub struct FillEngine {
    target: FillTarget,
    plan: FillPlan,
    token: CancelToken,
    report_every: u64,
}

impl FillEngine {
    pub fn new(target: FillTarget, plan: FillPlan, token: CancelToken, report_every: u64) -> Self {
        Self {
            target,
            plan,
            token,
            // A zero cadence would suppress every periodic event.
            report_every: report_every.max(1),
        }
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Run the plan to completion, cancellation, or first I/O failure.
    ///
    /// Never panics across this boundary: every failure is folded into the
    /// returned `RunOutcome` and also delivered via `reporter.on_terminal`.
    pub fn run(self, reporter: &dyn ProgressReporter) -> RunOutcome {
        let mut state = RunState {
            current_chunk: 0,
            total_bytes_written: 0,
            started: Instant::now(),
        };

        info!(
            dir = %self.target.dir.display(),
            bytes = self.plan.free_bytes,
            files = self.plan.file_count(),
            chunks = self.plan.total_chunks,
            start_index = self.plan.start_index,
            "Starting fill run"
        );

        let outcome = match self.execute(&mut state, reporter) {
            Ok(true) => {
                // Forced final event so observers always see 100%.
                self.emit_progress(&state, reporter);
                info!(
                    bytes = state.total_bytes_written,
                    chunks = state.current_chunk,
                    "Fill run completed"
                );
                RunOutcome::Completed
            }
            Ok(false) => {
                warn!(
                    bytes = state.total_bytes_written,
                    chunks = state.current_chunk,
                    "Fill run stopped by cancellation; partial files retained"
                );
                RunOutcome::Stopped
            }
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "Fill run failed; partial files retained");
                RunOutcome::Failed(e)
            }
        };

        reporter.on_terminal(&outcome);
        outcome
    }

    /// Ok(true) = all files written, Ok(false) = cancellation observed.
    fn execute(
        &self,
        state: &mut RunState,
        reporter: &dyn ProgressReporter,
    ) -> Result<bool, FillError> {
        // One zeroed buffer reused for every chunk; filler content only needs
        // to be deterministic, not meaningful.
        let buffer = vec![0u8; self.plan.chunk_size as usize];

        for i in 0..self.plan.file_count() {
            // Checked before each file so cancellation never creates a new one.
            if self.token.is_signaled() {
                return Ok(false);
            }
            let path = filler_path(&self.target.dir, self.plan.start_index + i);
            let size = self.plan.file_size(i);
            debug!(path = %path.display(), size, "Creating filler file");
            if !self.write_filler(&path, size, &buffer, state, reporter)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Write one filler file up to `size` bytes. Ok(false) means cancellation
    /// was observed mid-file; the partial file is left at whatever size it
    /// reached. The handle closes on every exit path via drop scoping.
    fn write_filler(
        &self,
        path: &Path,
        size: u64,
        buffer: &[u8],
        state: &mut RunState,
        reporter: &dyn ProgressReporter,
    ) -> Result<bool, FillError> {
        // create_new: the index scan guarantees a fresh name, so an existing
        // file here is a real conflict, not something to overwrite.
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| FillError::Io { path: path.to_path_buf(), source: e })?;

        let mut written: u64 = 0;
        while written < size {
            if self.token.is_signaled() {
                return Ok(false);
            }
            let n = (size - written).min(self.plan.chunk_size);
            file.write_all(&buffer[..n as usize])
                .map_err(|e| FillError::Io { path: path.to_path_buf(), source: e })?;
            written += n;
            state.total_bytes_written += n;
            state.current_chunk += 1;

            if state.current_chunk % self.report_every == 0 {
                self.emit_progress(state, reporter);
            }
        }
        Ok(true)
    }

    fn emit_progress(&self, state: &RunState, reporter: &dyn ProgressReporter) {
        let elapsed = state.started.elapsed().as_secs_f64();
        let (speed_mbps, eta_seconds) = if elapsed >= MIN_ELAPSED_SECS && state.total_bytes_written > 0
        {
            let bytes_per_sec = state.total_bytes_written as f64 / elapsed;
            let remaining = self.plan.free_bytes - state.total_bytes_written;
            (
                Some(bytes_per_sec / MIB),
                Some((remaining as f64 / bytes_per_sec).round() as u64),
            )
        } else {
            (None, None)
        };

        reporter.on_progress(Progress {
            current_chunk: state.current_chunk,
            total_chunks: self.plan.total_chunks,
            bytes_written: state.total_bytes_written,
            speed_mbps,
            eta_seconds,
        });
    }
}

/// Handle to a fill running on its own worker thread.
///
/// The worker's outcome is always observable through `wait()`; a panicking
/// worker yields `Failed(WorkerLost)` rather than disappearing silently.
pub struct FillHandle {
    join: JoinHandle<RunOutcome>,
    token: CancelToken,
}

impl FillHandle {
    /// Signal cooperative cancellation; the worker stops within one chunk.
    pub fn cancel(&self) {
        self.token.signal();
    }

    /// Token shared with the worker, for wiring into signal handlers.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Block until the run reaches a terminal state.
    pub fn wait(self) -> RunOutcome {
        self.join
            .join()
            .unwrap_or(RunOutcome::Failed(FillError::WorkerLost))
    }
}

/// Start a fill on a dedicated worker thread; the calling context stays
/// responsive and observes the run via `reporter` and the returned handle.
///
/// The caller supplies the token so it can be wired into signal handlers
/// before the worker starts. Callers must not start a second fill against the
/// same directory while a prior handle's outcome is pending.
pub fn start_fill(
    target: FillTarget,
    plan: FillPlan,
    report_every: u64,
    token: CancelToken,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<FillHandle, FillError> {
    let dir = target.dir.clone();
    let engine = FillEngine::new(target, plan, token.clone(), report_every);

    let join = thread::Builder::new()
        .name("diskfill-worker".into())
        .spawn(move || engine.run(reporter.as_ref()))
        .map_err(|e| FillError::Io { path: dir, source: e })?;

    Ok(FillHandle { join, token })
}
