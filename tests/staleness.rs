mod common;

use std::time::Duration;

use nobuild::rebuild::stale::{Staleness, check};
use proptest::prelude::*;

use crate::common::{base_time, init_tracing, write_file_with_mtime};

#[test]
fn missing_binary_needs_rebuild() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    let binary = dir.path().join("does-not-exist");
    let source = dir.path().join("build.rs");
    write_file_with_mtime(&source, b"fn main() {}", base_time());

    let result = check(&binary, [&source]).unwrap();
    assert_eq!(result, Staleness::NeedsRebuild);
}

#[test]
fn missing_binary_needs_rebuild_even_with_empty_watch_set() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    let binary = dir.path().join("does-not-exist");
    let empty: [&std::path::Path; 0] = [];

    assert_eq!(check(&binary, empty).unwrap(), Staleness::NeedsRebuild);
}

#[test]
fn newer_watched_file_needs_rebuild() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let base = base_time();

    let binary = dir.path().join("bin");
    let source = dir.path().join("build.rs");
    write_file_with_mtime(&binary, b"binary", base);
    write_file_with_mtime(&source, b"fn main() {}", base + Duration::from_secs(1));

    assert_eq!(check(&binary, [&source]).unwrap(), Staleness::NeedsRebuild);
}

#[test]
fn all_watched_files_older_or_equal_is_up_to_date() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let base = base_time();

    let binary = dir.path().join("bin");
    let older = dir.path().join("older.rs");
    let equal = dir.path().join("equal.rs");
    write_file_with_mtime(&binary, b"binary", base);
    write_file_with_mtime(&older, b"a", base - Duration::from_secs(5));
    write_file_with_mtime(&equal, b"b", base);

    assert_eq!(check(&binary, [&older, &equal]).unwrap(), Staleness::UpToDate);
}

#[test]
fn checker_is_idempotent() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let base = base_time();

    let binary = dir.path().join("bin");
    let source = dir.path().join("build.rs");
    write_file_with_mtime(&binary, b"binary", base);
    write_file_with_mtime(&source, b"fn main() {}", base - Duration::from_secs(1));

    assert_eq!(check(&binary, [&source]).unwrap(), Staleness::UpToDate);
    assert_eq!(check(&binary, [&source]).unwrap(), Staleness::UpToDate);
}

#[test]
fn missing_watched_file_is_skipped() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let base = base_time();

    let binary = dir.path().join("bin");
    let present = dir.path().join("present.rs");
    let absent = dir.path().join("absent.rs");
    write_file_with_mtime(&binary, b"binary", base);
    write_file_with_mtime(&present, b"a", base - Duration::from_secs(1));

    let result = check(&binary, [&absent, &present]).unwrap();
    assert_eq!(result, Staleness::UpToDate);
}

#[test]
fn duplicate_watch_entries_are_harmless() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let base = base_time();

    let binary = dir.path().join("bin");
    let source = dir.path().join("build.rs");
    write_file_with_mtime(&binary, b"binary", base);
    write_file_with_mtime(&source, b"fn main() {}", base + Duration::from_secs(2));

    let result = check(&binary, [&source, &source, &source]).unwrap();
    assert_eq!(result, Staleness::NeedsRebuild);
}

proptest! {
    /// Monotonic trigger: the checker returns `NeedsRebuild` exactly when
    /// some watched file is strictly newer than the binary.
    #[test]
    fn rebuild_iff_some_watched_file_is_newer(
        offsets in proptest::collection::vec(-300i64..=300, 1..6)
    ) {
        let dir = tempfile::tempdir().unwrap();
        let base = base_time();

        let binary = dir.path().join("bin");
        write_file_with_mtime(&binary, b"binary", base);

        let mut watch = Vec::new();
        for (i, off) in offsets.iter().enumerate() {
            let path = dir.path().join(format!("src-{i}.rs"));
            let mtime = if *off >= 0 {
                base + Duration::from_secs(*off as u64)
            } else {
                base - Duration::from_secs(off.unsigned_abs())
            };
            write_file_with_mtime(&path, b"source", mtime);
            watch.push(path);
        }

        let expected = if offsets.iter().any(|off| *off > 0) {
            Staleness::NeedsRebuild
        } else {
            Staleness::UpToDate
        };

        prop_assert_eq!(check(&binary, &watch).unwrap(), expected);
    }
}
