use assert_fs::prelude::*;
use diskfill::{filler_path, next_filler_index};

#[test]
fn empty_directory_starts_at_zero() {
    let dir = assert_fs::TempDir::new().unwrap();
    assert_eq!(next_filler_index(dir.path()).unwrap(), 0);
}

/// Well-formed indices 0 and 2 plus a malformed name; the
/// malformed entry is skipped and the next index is max + 1.
#[test]
fn malformed_names_are_skipped() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("filler_0.bin").touch().unwrap();
    dir.child("filler_2.bin").touch().unwrap();
    dir.child("filler_x.bin").touch().unwrap();

    assert_eq!(next_filler_index(dir.path()).unwrap(), 3);
}

#[test]
fn unrelated_files_are_ignored() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("notes.txt").touch().unwrap();
    dir.child("filler_5.dat").touch().unwrap();
    dir.child("filler_.bin").touch().unwrap();
    dir.child("subdir").create_dir_all().unwrap();

    assert_eq!(next_filler_index(dir.path()).unwrap(), 0);
}

#[test]
fn scan_is_idempotent_on_unchanged_directory() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("filler_7.bin").touch().unwrap();

    let first = next_filler_index(dir.path()).unwrap();
    let second = next_filler_index(dir.path()).unwrap();
    assert_eq!(first, 8);
    assert_eq!(first, second);
}

#[test]
fn large_indices_parse_without_fixed_width() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("filler_9.bin").touch().unwrap();
    dir.child("filler_100.bin").touch().unwrap();

    assert_eq!(next_filler_index(dir.path()).unwrap(), 101);
}

#[test]
fn filler_path_layout() {
    let dir = assert_fs::TempDir::new().unwrap();
    let p = filler_path(dir.path(), 12);
    assert_eq!(p.file_name().unwrap(), "filler_12.bin");
    assert_eq!(p.parent().unwrap(), dir.path());
}
