use std::fs;

use assert_cmd::Command;
use tempfile::tempdir;

fn diskfill() -> Command {
    Command::cargo_bin("diskfill").expect("binary built")
}

/// End-to-end fill with a small capped budget: two full files, no remainder.
#[test]
fn capped_fill_creates_expected_files() {
    let dir = tempdir().unwrap();
    diskfill()
        .arg(dir.path())
        .args(["--yes", "--max-bytes", "8192"])
        .args(["--large-file-size", "4096", "--chunk-size", "1024"])
        .assert()
        .success();

    assert_eq!(fs::metadata(dir.path().join("filler_0.bin")).unwrap().len(), 4096);
    assert_eq!(fs::metadata(dir.path().join("filler_1.bin")).unwrap().len(), 4096);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

/// A capped budget that is not a multiple of the file size leaves a remainder file.
#[test]
fn capped_fill_with_remainder() {
    let dir = tempdir().unwrap();
    diskfill()
        .arg(dir.path())
        .args(["--yes", "--max-bytes", "5120"])
        .args(["--large-file-size", "4096", "--chunk-size", "1024"])
        .assert()
        .success();

    assert_eq!(fs::metadata(dir.path().join("filler_0.bin")).unwrap().len(), 4096);
    assert_eq!(fs::metadata(dir.path().join("filler_1.bin")).unwrap().len(), 1024);
}

/// Filler content is deterministic zeros.
#[test]
fn filler_content_is_zeroed() {
    let dir = tempdir().unwrap();
    diskfill()
        .arg(dir.path())
        .args(["--yes", "--max-bytes", "2048"])
        .args(["--large-file-size", "2048", "--chunk-size", "1024"])
        .assert()
        .success();

    let data = fs::read(dir.path().join("filler_0.bin")).unwrap();
    assert_eq!(data.len(), 2048);
    assert!(data.iter().all(|&b| b == 0));
}

/// Re-invocation continues numbering instead of clobbering prior filler files.
#[test]
fn repeated_invocations_append() {
    let dir = tempdir().unwrap();
    let args = [
        "--yes",
        "--max-bytes",
        "4096",
        "--large-file-size",
        "4096",
        "--chunk-size",
        "1024",
    ];

    diskfill().arg(dir.path()).args(args).assert().success();
    diskfill().arg(dir.path()).args(args).assert().success();

    assert!(dir.path().join("filler_0.bin").exists());
    assert!(dir.path().join("filler_1.bin").exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}
