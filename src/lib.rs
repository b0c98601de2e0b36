//! Core library for `diskfill`.
//!
//! Fills the free space of the volume owning a target directory with
//! deterministic zero-filled filler files (`filler_<index>.bin`), written in
//! bounded-size chunks. The core exposes four pieces:
//!
//! - [`probe::available_bytes`]: point-in-time free-space snapshot.
//! - [`FillPlan::derive`]: split the byte budget into files/chunks and pick the
//!   next filler index so repeated runs append instead of overwriting.
//! - [`start_fill`] / [`FillEngine`]: the chunked write loop on a worker
//!   thread, observable through a [`ProgressReporter`] and a [`FillHandle`].
//! - [`CancelToken`]: cooperative stop flag polled at chunk granularity.
//!
//! The directory listing itself is the durable ledger across runs; no other
//! on-disk state is kept.

pub mod cancel;
pub mod engine;
pub mod errors;
pub mod output;
pub mod plan;
pub mod probe;
pub mod progress;
pub mod settings;

pub use cancel::CancelToken;
pub use engine::{FillEngine, FillHandle, start_fill};
pub use errors::{FillError, RunOutcome};
pub use plan::{FillPlan, FillTarget, filler_path, next_filler_index};
pub use probe::available_bytes;
pub use progress::{NullReporter, Progress, ProgressReporter};
pub use settings::{
    DEFAULT_CHUNK_SIZE, DEFAULT_LARGE_FILE_SIZE, DEFAULT_REPORT_EVERY, FillSettings, LogLevel,
};
