//! Tunable fill parameters and console verbosity.
//! Large-file size, chunk size and report cadence are configuration rather than
//! constants so tests and the CLI can run with small values.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::FillError;

/// Default size of one full filler file: 1 GiB.
pub const DEFAULT_LARGE_FILE_SIZE: u64 = 1024 * 1024 * 1024;
/// Default size of one write chunk: 1 MiB.
pub const DEFAULT_CHUNK_SIZE: u64 = 1024 * 1024;
/// Default progress cadence: one event every N chunks.
pub const DEFAULT_REPORT_EVERY: u64 = 10;

/// Runtime parameters for one fill operation.
#[derive(Debug, Clone)]
pub struct FillSettings {
    /// Target size of each full filler file.
    pub large_file_size: u64,
    /// Size of a single write (also the cancellation-check granularity).
    pub chunk_size: u64,
    /// Emit a progress event every this many chunks.
    pub report_every: u64,
    /// Optional cap on the number of bytes to fill (min of this and free space).
    pub max_bytes: Option<u64>,
}

impl Default for FillSettings {
    fn default() -> Self {
        Self {
            large_file_size: DEFAULT_LARGE_FILE_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            report_every: DEFAULT_REPORT_EVERY,
            max_bytes: None,
        }
    }
}

impl FillSettings {
    /// Reject parameter combinations the engine cannot honor.
    ///
    /// `large_file_size` must be a whole number of chunks so that the per-file
    /// chunk counts sum exactly to `ceil(free_bytes / chunk_size)`.
    pub fn validate(&self) -> Result<(), FillError> {
        if self.chunk_size == 0 {
            return Err(FillError::InvalidSettings("chunk_size must be non-zero".into()));
        }
        if self.large_file_size == 0 {
            return Err(FillError::InvalidSettings(
                "large_file_size must be non-zero".into(),
            ));
        }
        if self.large_file_size % self.chunk_size != 0 {
            return Err(FillError::InvalidSettings(format!(
                "large_file_size ({}) must be a multiple of chunk_size ({})",
                self.large_file_size, self.chunk_size
            )));
        }
        if self.report_every == 0 {
            return Err(FillError::InvalidSettings(
                "report_every must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Program-defined verbosity levels exposed to users.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// OS-appropriate default log file path (data dir).
pub fn default_log_path() -> Option<PathBuf> {
    if let Some(mut base) = dirs::data_dir() {
        base.push("diskfill");
        // ensure dir exists (best-effort)
        let _ = std::fs::create_dir_all(&base);
        base.push("diskfill.log");
        Some(base)
    } else {
        std::env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".local")
                .join("share")
                .join("diskfill")
                .join("diskfill.log")
        })
    }
}
