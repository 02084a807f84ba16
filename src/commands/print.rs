//! Print command implementation.

use super::{live_snapshot, validate_number};
use psdiff::SnapshotStore;
use std::path::Path;

/// Lists snapshot `number`, or the live process table when `None`, one
/// display line per record in ascending pid order.
pub fn command_print(
    store: &SnapshotStore,
    proc_root: &Path,
    number: Option<i64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = match number {
        Some(n) => store.load(validate_number(n)?)?,
        None => live_snapshot(store, proc_root)?,
    };
    for record in &records {
        println!("{}", record.display_line());
    }
    Ok(())
}
