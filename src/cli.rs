//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Sizes are raw byte counts so tests can pass tiny values.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use diskfill::{FillSettings, LogLevel};

/// Fill the free space of a volume with deterministic filler files.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Fill all free space on a volume with filler files (Rust)"
)]
pub struct Args {
    /// Directory to fill; filler files are created directly inside it.
    #[arg(value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub target: PathBuf,

    /// Size of each full filler file, in bytes. Must be a multiple of the chunk size.
    #[arg(long, value_name = "BYTES", default_value_t = diskfill::DEFAULT_LARGE_FILE_SIZE)]
    pub large_file_size: u64,

    /// Size of a single write chunk, in bytes.
    #[arg(long, value_name = "BYTES", default_value_t = diskfill::DEFAULT_CHUNK_SIZE)]
    pub chunk_size: u64,

    /// Emit a progress update every N chunks.
    #[arg(long, value_name = "N", default_value_t = diskfill::DEFAULT_REPORT_EVERY)]
    pub report_every: u64,

    /// Cap the fill at this many bytes instead of all free space.
    #[arg(long, value_name = "BYTES")]
    pub max_bytes: Option<u64>,

    /// Print the derived plan and exit without writing anything.
    #[arg(long, help = "Show the plan (files, sizes, chunks) and exit")]
    pub plan_only: bool,

    /// Skip the interactive confirmation prompt.
    #[arg(short = 'y', long, help = "Assume yes; do not ask for confirmation")]
    pub yes: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also log to a file. Without a PATH the OS data directory is used.
    #[arg(
        long,
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        num_args = 0..=1,
        help = "Log to a file (default path under the OS data dir when PATH is omitted)"
    )]
    pub log_file: Option<Option<PathBuf>>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > Normal.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.debug {
            return LogLevel::Debug;
        }
        self.log_level
            .as_deref()
            .and_then(LogLevel::parse)
            .unwrap_or_default()
    }

    /// Effective log file path, if file logging was requested.
    pub fn effective_log_file(&self) -> Option<PathBuf> {
        match &self.log_file {
            Some(Some(path)) => Some(path.clone()),
            Some(None) => diskfill::settings::default_log_path(),
            None => None,
        }
    }

    /// Assemble engine settings from the size/cadence flags.
    pub fn settings(&self) -> FillSettings {
        FillSettings {
            large_file_size: self.large_file_size,
            chunk_size: self.chunk_size,
            report_every: self.report_every,
            max_bytes: self.max_bytes,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
