//! Save command implementation.

use super::live_snapshot;
use psdiff::SnapshotStore;
use std::path::Path;
use tracing::info;

/// Captures the live process table and writes it as a new snapshot.
/// `explicit` pins the sequence number (the store rejects negatives);
/// `None` takes the next free one.
pub fn command_save(
    store: &SnapshotStore,
    proc_root: &Path,
    explicit: Option<i64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = live_snapshot(store, proc_root)?;
    let path = store.save(&records, explicit)?;
    info!("snapshot written: {}", path.display());
    Ok(())
}
