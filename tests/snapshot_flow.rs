//! Integration tests for the snapshot save/load/diff flow.
//!
//! These tests drive the store, codec, filter, and diff engine together
//! through the library surface, the way the CLI glue does, using mocked
//! process tables instead of a live /proc.

use psdiff::{diff, filter_processes, ProcessRecord, SnapshotStore};
use tempfile::tempdir;

const MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Helper to build a record with the fields the scenarios care about.
fn record(pid: u32, name: &str, cmdline: &str) -> ProcessRecord {
    ProcessRecord {
        pid,
        ppid: 1,
        gid: 1000,
        username: "root".to_string(),
        name: name.to_string(),
        cmdline: cmdline.to_string(),
    }
}

#[test]
fn test_save_then_diff_reports_only_new_process() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = SnapshotStore::new(dir.path(), "ps", MAX_BYTES);

    // Snapshot 0 of a one-process table.
    let before = vec![record(1, "a", "bin")];
    store.save(&before, None).expect("save must succeed");

    // The table gains pid 2 with a multi-token command line.
    let after = vec![record(1, "a", "bin"), record(2, "b", "x y")];

    let reference = store.load(0).expect("load must succeed");
    let d = diff(&reference, &after);

    assert!(d.removed.is_empty(), "no process terminated");
    assert_eq!(d.added.len(), 1);
    assert_eq!(d.added[0].pid, 2);
    assert_eq!(d.added[0].cmdline, "x y");

    let rendered = d.render();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("+ "));
}

#[test]
fn test_embedded_double_quote_survives_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = SnapshotStore::new(dir.path(), "ps", MAX_BYTES);

    // argv ["cmd", "\"2\""] flattened: the quote characters are payload.
    let original = record(640, "worker", "cmd \"2\"");
    let display_before = original.display_line();

    store.save(&[original.clone()], Some(1)).expect("save must succeed");
    let loaded = store.load(1).expect("load must succeed");

    assert_eq!(loaded, vec![original]);
    assert_eq!(loaded[0].display_line(), display_before);
}

#[test]
fn test_diff_against_identical_snapshot_prints_no_differences() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = SnapshotStore::new(dir.path(), "ps", MAX_BYTES);

    let table = vec![record(1, "a", "bin"), record(9, "nginx: worker", "nginx -g daemon off;")];
    store.save(&table, None).expect("save must succeed");
    store.save(&table, None).expect("save must succeed");

    let d = diff(
        &store.load(0).expect("load must succeed"),
        &store.load(1).expect("load must succeed"),
    );
    assert_eq!(d.render(), "No differences found.");
}

#[test]
fn test_changed_cmdline_same_pid_is_remove_plus_add() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = SnapshotStore::new(dir.path(), "ps", MAX_BYTES);

    store
        .save(&[record(10, "app", "bin --old")], None)
        .expect("save must succeed");
    let current = vec![record(10, "app", "bin --new")];

    let d = diff(&store.load(0).expect("load must succeed"), &current);
    assert_eq!(d.removed.len(), 1);
    assert_eq!(d.added.len(), 1);

    let rendered = d.render();
    let lines: Vec<&str> = rendered.lines().collect();
    assert!(lines[0].starts_with("- ") && lines[0].contains("--old"));
    assert!(lines[1].starts_with("+ ") && lines[1].contains("--new"));
}

#[test]
fn test_filtered_capture_then_sequence_allocation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = SnapshotStore::new(dir.path(), "ps", MAX_BYTES);

    // A raw enumeration with noise: a root kworker and the tool itself.
    let own_pid = 555;
    let raw = vec![
        record(100, "kworker/0:1", ""),
        record(own_pid, "psdiff", "psdiff -s"),
        record(200, "sshd", "/usr/sbin/sshd -D"),
    ];
    let filtered = filter_processes(raw, own_pid);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].pid, 200);

    store.save(&filtered, Some(0)).expect("save must succeed");
    store.save(&filtered, Some(2)).expect("save must succeed");
    store.save(&filtered, Some(5)).expect("save must succeed");
    assert_eq!(store.next_number().expect("scan must succeed"), 6);

    let path = store.save(&filtered, None).expect("save must succeed");
    assert!(path.ends_with("ps.6"));
}

#[test]
fn test_delete_all_empties_the_store() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = SnapshotStore::new(dir.path(), "ps", MAX_BYTES);

    for _ in 0..3 {
        store.save(&[record(1, "a", "bin")], None).expect("save must succeed");
    }
    assert_eq!(store.list_numbers().expect("scan must succeed").len(), 3);

    let deleted = store.delete_all().expect("delete must succeed");
    assert_eq!(deleted, 3);
    assert!(store.latest_number().expect("scan must succeed").is_none());
}
