//! CLI command implementations for psdiff.
//!
//! This module provides implementations for the operating modes:
//! - `save`: capture the live process table into a numbered snapshot
//! - `print`: list a saved snapshot or the live table
//! - `compare`: diff two snapshots, or a snapshot against the live table
//! - `delete`: interactively wipe all saved snapshots

pub mod compare;
pub mod delete;
pub mod print;
pub mod save;

// Re-export command functions
pub use compare::command_compare;
pub use delete::command_delete;
pub use print::command_print;
pub use save::command_save;

use psdiff::{filter_processes, scanner, ProcessRecord, SnapshotStore, StoreError};
use std::path::Path;

/// Captures the live process table: runs the advisory maintenance check,
/// enumerates `proc_root`, strips noise entries, and sorts ascending by
/// pid.
fn live_snapshot(store: &SnapshotStore, proc_root: &Path) -> std::io::Result<Vec<ProcessRecord>> {
    store.maintenance_check();
    let own_pid = nix::unistd::getpid().as_raw() as u32;
    let mut records = filter_processes(scanner::enumerate_processes(proc_root)?, own_pid);
    records.sort_by_key(|r| r.pid);
    Ok(records)
}

/// Maps a CLI-supplied snapshot number to a sequence number, rejecting
/// negatives.
fn validate_number(n: i64) -> Result<u64, StoreError> {
    if n < 0 {
        return Err(StoreError::InvalidArgument(format!(
            "snapshot number must be non-negative, got {n}"
        )));
    }
    Ok(n as u64)
}
