//! Free-space probe.
//! Reports the bytes currently available to this user on the volume owning a
//! directory; statvfs on Unix, GetDiskFreeSpaceExW on Windows. Side-effect-free.

use std::io;
use std::path::Path;

use crate::errors::FillError;

/// Bytes available on the volume that owns `dir`.
///
/// Uses `f_bavail` (space available to an unprivileged user), not `f_bfree`,
/// so root-reserved blocks are excluded. Fails when `dir` does not resolve to
/// an existing, readable directory.
pub fn available_bytes(dir: &Path) -> Result<u64, FillError> {
    // Probe readability up front so a bad path surfaces as one clear error
    // instead of a platform-specific stat failure.
    if !dir.is_dir() {
        return Err(FillError::Probe {
            path: dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "not an existing directory"),
        });
    }
    std::fs::read_dir(dir).map_err(|e| FillError::Probe {
        path: dir.to_path_buf(),
        source: e,
    })?;

    free_space_bytes(dir).map_err(|e| FillError::Probe {
        path: dir.to_path_buf(),
        source: e,
    })
}

#[cfg(unix)]
fn free_space_bytes(path: &Path) -> io::Result<u64> {
    use std::os::unix::ffi::OsStrExt;

    let mut s: libc::statvfs = unsafe { std::mem::zeroed() };
    let cpath = std::ffi::CString::new(path.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains NUL"))?;
    let rc = unsafe { libc::statvfs(cpath.as_ptr(), &mut s) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok((s.f_bavail as u64).saturating_mul(s.f_frsize as u64))
}

#[cfg(windows)]
fn free_space_bytes(path: &Path) -> io::Result<u64> {
    use std::iter::once;
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Storage::FileSystem::GetDiskFreeSpaceExW;

    let wide: Vec<u16> = path.as_os_str().encode_wide().chain(once(0)).collect();
    let mut free_avail: u64 = 0;
    let mut _total: u64 = 0;
    let mut _total_free: u64 = 0;
    let ok = unsafe {
        GetDiskFreeSpaceExW(
            wide.as_ptr(),
            &mut free_avail as *mut u64,
            &mut _total as *mut u64,
            &mut _total_free as *mut u64,
        )
    };
    if ok == 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(free_avail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn probe_smoke() {
        let dir = tempdir().unwrap();
        let bytes = available_bytes(dir.path()).unwrap();
        assert!(bytes > 0);
    }

    #[test]
    fn probe_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("does-not-exist");
        let err = available_bytes(&gone).unwrap_err();
        assert!(matches!(err, FillError::Probe { .. }));
    }

    #[test]
    fn probe_file_not_dir_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, b"x").unwrap();
        assert!(available_bytes(&file).is_err());
    }
}
