//! Fill planning.
//! Splits the probed free-byte budget into full-size filler files plus one
//! remainder file, and scans the target directory so filename numbering
//! continues across runs instead of overwriting earlier filler files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::FillError;
use crate::settings::FillSettings;

const FILLER_PREFIX: &str = "filler_";
const FILLER_SUFFIX: &str = ".bin";

/// Immutable snapshot taken when a fill begins.
///
/// Free space is probed exactly once; it is never re-queried mid-run, so a
/// concurrent writer on the same volume surfaces later as an I/O failure.
#[derive(Debug, Clone)]
pub struct FillTarget {
    pub dir: PathBuf,
    pub free_bytes_at_start: u64,
}

impl FillTarget {
    pub fn new(dir: impl Into<PathBuf>, free_bytes_at_start: u64) -> Self {
        Self { dir: dir.into(), free_bytes_at_start }
    }
}

/// Derived write plan; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillPlan {
    pub large_file_size: u64,
    pub chunk_size: u64,
    /// The byte budget this plan was derived from.
    pub free_bytes: u64,
    pub full_file_count: u64,
    /// Size of the final, smaller file; `0 <= remainder_bytes < large_file_size`.
    pub remainder_bytes: u64,
    pub total_chunks: u64,
    /// First filler index this run will use.
    pub start_index: u64,
}

impl FillPlan {
    /// Derive a plan for filling `free_bytes` in `dir`.
    ///
    /// `free_bytes == 0` is reported as `NoFreeSpace`; callers should surface
    /// it as a warning, not a failure. The index scan tolerates malformed
    /// filler names (they are skipped, not fatal).
    pub fn derive(dir: &Path, free_bytes: u64, settings: &FillSettings) -> Result<Self, FillError> {
        settings.validate()?;
        if free_bytes == 0 {
            return Err(FillError::NoFreeSpace(dir.to_path_buf()));
        }

        let start_index = next_filler_index(dir)?;
        let plan = Self {
            large_file_size: settings.large_file_size,
            chunk_size: settings.chunk_size,
            free_bytes,
            full_file_count: free_bytes / settings.large_file_size,
            remainder_bytes: free_bytes % settings.large_file_size,
            total_chunks: free_bytes.div_ceil(settings.chunk_size),
            start_index,
        };
        debug!(
            free_bytes,
            full_files = plan.full_file_count,
            remainder = plan.remainder_bytes,
            chunks = plan.total_chunks,
            start_index,
            "Derived fill plan"
        );
        Ok(plan)
    }

    /// Number of files this plan will create.
    pub fn file_count(&self) -> u64 {
        self.full_file_count + u64::from(self.remainder_bytes > 0)
    }

    /// Target size of the `i`-th file of this plan (`i < file_count()`).
    pub fn file_size(&self, i: u64) -> u64 {
        if i < self.full_file_count {
            self.large_file_size
        } else {
            self.remainder_bytes
        }
    }
}

/// Path of the filler file with the given index inside `dir`.
pub fn filler_path(dir: &Path, index: u64) -> PathBuf {
    dir.join(format!("{FILLER_PREFIX}{index}{FILLER_SUFFIX}"))
}

/// Next available filler index in `dir`: `max(existing) + 1`, or 0 if none.
///
/// Only names matching `filler_<N>.bin` with a parseable base-10 `N` count;
/// anything else in the directory is ignored.
pub fn next_filler_index(dir: &Path) -> Result<u64, FillError> {
    let entries = fs::read_dir(dir).map_err(|e| FillError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut max_index: Option<u64> = None;
    for entry in entries {
        let entry = entry.map_err(|e| FillError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let Some(index) = parse_filler_index(name) else { continue };
        max_index = Some(max_index.map_or(index, |m| m.max(index)));
    }

    Ok(max_index.map_or(0, |m| m + 1))
}

fn parse_filler_index(name: &str) -> Option<u64> {
    name.strip_prefix(FILLER_PREFIX)?
        .strip_suffix(FILLER_SUFFIX)?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_names() {
        assert_eq!(parse_filler_index("filler_0.bin"), Some(0));
        assert_eq!(parse_filler_index("filler_42.bin"), Some(42));
    }

    #[test]
    fn rejects_malformed_names() {
        assert_eq!(parse_filler_index("filler_x.bin"), None);
        assert_eq!(parse_filler_index("filler_.bin"), None);
        assert_eq!(parse_filler_index("filler_1.dat"), None);
        assert_eq!(parse_filler_index("other_1.bin"), None);
        assert_eq!(parse_filler_index("filler_-1.bin"), None);
    }

    #[test]
    fn file_sizes_cover_budget() {
        let settings = FillSettings {
            large_file_size: 10 * 1024,
            chunk_size: 1024,
            ..Default::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let plan = FillPlan::derive(dir.path(), 25 * 1024, &settings).unwrap();
        let total: u64 = (0..plan.file_count()).map(|i| plan.file_size(i)).sum();
        assert_eq!(total, plan.free_bytes);
    }
}
