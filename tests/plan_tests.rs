use diskfill::{FillError, FillPlan, FillSettings};
use tempfile::tempdir;

const KIB: u64 = 1024;

fn settings(large: u64, chunk: u64) -> FillSettings {
    FillSettings {
        large_file_size: large,
        chunk_size: chunk,
        ..Default::default()
    }
}

/// Reference shape: 25 MiB budget, 10 MiB files, 1 MiB chunks (scaled to KiB
/// so the numbers stay readable).
#[test]
fn plan_splits_budget_into_full_files_and_remainder() {
    let dir = tempdir().unwrap();
    let plan = FillPlan::derive(dir.path(), 25 * KIB, &settings(10 * KIB, KIB)).unwrap();

    assert_eq!(plan.full_file_count, 2);
    assert_eq!(plan.remainder_bytes, 5 * KIB);
    assert_eq!(plan.total_chunks, 25);
    assert_eq!(plan.start_index, 0);
    assert_eq!(plan.file_count(), 3);
}

#[test]
fn plan_identity_holds_for_varied_budgets() {
    let dir = tempdir().unwrap();
    let s = settings(10 * KIB, KIB);
    for free in [1, KIB - 1, KIB, 10 * KIB, 10 * KIB + 1, 25 * KIB, 99 * KIB + 17] {
        let plan = FillPlan::derive(dir.path(), free, &s).unwrap();
        assert_eq!(
            plan.full_file_count * plan.large_file_size + plan.remainder_bytes,
            free,
            "identity broken for free={free}"
        );
        assert!(plan.remainder_bytes < plan.large_file_size);
        assert_eq!(plan.total_chunks, free.div_ceil(plan.chunk_size));
    }
}

#[test]
fn plan_exact_multiple_has_no_remainder() {
    let dir = tempdir().unwrap();
    let plan = FillPlan::derive(dir.path(), 30 * KIB, &settings(10 * KIB, KIB)).unwrap();
    assert_eq!(plan.full_file_count, 3);
    assert_eq!(plan.remainder_bytes, 0);
    assert_eq!(plan.file_count(), 3);
}

#[test]
fn plan_budget_smaller_than_one_file() {
    let dir = tempdir().unwrap();
    let plan = FillPlan::derive(dir.path(), 3 * KIB, &settings(10 * KIB, KIB)).unwrap();
    assert_eq!(plan.full_file_count, 0);
    assert_eq!(plan.remainder_bytes, 3 * KIB);
    assert_eq!(plan.file_count(), 1);
    assert_eq!(plan.total_chunks, 3);
}

/// Zero free space is its own error, surfaced by the CLI as a warning rather
/// than a failure.
#[test]
fn plan_zero_free_space_is_rejected() {
    let dir = tempdir().unwrap();
    let err = FillPlan::derive(dir.path(), 0, &settings(10 * KIB, KIB)).unwrap_err();
    assert!(matches!(err, FillError::NoFreeSpace(_)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn plan_rejects_unaligned_settings() {
    let dir = tempdir().unwrap();
    let err = FillPlan::derive(dir.path(), 25 * KIB, &settings(10 * KIB + 1, KIB)).unwrap_err();
    assert!(matches!(err, FillError::InvalidSettings(_)));
}

#[test]
fn plan_derive_on_missing_dir_fails() {
    let dir = tempdir().unwrap();
    let gone = dir.path().join("nope");
    let err = FillPlan::derive(&gone, 25 * KIB, &settings(10 * KIB, KIB)).unwrap_err();
    assert!(matches!(err, FillError::Io { .. }));
}
