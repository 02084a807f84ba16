//! Compare command implementation.

use super::{live_snapshot, validate_number};
use psdiff::{diff, SnapshotStore, StoreError};
use std::path::Path;

/// Diffs two process record collections and prints the change report.
///
/// `numbers` carries what the CLI received: empty means latest saved
/// snapshot against the live table, one number means that snapshot
/// against live, two numbers diff the first against the second.
pub fn command_compare(
    store: &SnapshotStore,
    proc_root: &Path,
    numbers: &[i64],
) -> Result<(), Box<dyn std::error::Error>> {
    let reference_number = match numbers.first() {
        Some(&n) => validate_number(n)?,
        None => store
            .latest_number()?
            .ok_or_else(|| StoreError::NoSnapshots {
                dir: store.dir().to_path_buf(),
            })?,
    };
    let reference = store.load(reference_number)?;

    let current = match numbers.get(1) {
        Some(&n) => store.load(validate_number(n)?)?,
        None => live_snapshot(store, proc_root)?,
    };

    println!("{}", diff(&reference, &current).render());
    Ok(())
}
