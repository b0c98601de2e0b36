//! Typed error definitions for diskfill.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FillError {
    #[error("Cannot probe free space for {path}: {source}")]
    Probe { path: PathBuf, source: io::Error },

    #[error("No free space available on the volume holding {0}")]
    NoFreeSpace(PathBuf),

    #[error("Invalid fill settings: {0}")]
    InvalidSettings(String),

    #[error("I/O failure on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("Fill worker terminated abnormally")]
    WorkerLost,
}

impl FillError {
    /// Stable machine-readable kind string for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FillError::Probe { .. } => "probe",
            FillError::NoFreeSpace(_) => "no_free_space",
            FillError::InvalidSettings(_) => "invalid_settings",
            FillError::Io { .. } => "io",
            FillError::WorkerLost => "worker_lost",
        }
    }
}

/// Terminal result of one fill run.
///
/// Cancellation is a normal outcome (`Stopped`), never an error; any I/O
/// failure aborts the run and is carried inside `Failed`.
#[derive(Debug)]
pub enum RunOutcome {
    /// Every planned byte was written.
    Completed,
    /// The cancellation token was observed; files written so far remain.
    Stopped,
    /// The run aborted mid-way; partial files remain, no retry is attempted.
    Failed(FillError),
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed)
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, RunOutcome::Stopped)
    }
}
