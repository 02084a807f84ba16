//! Delete command implementation.

use psdiff::SnapshotStore;
use std::io::{self, Write};

/// Interactively confirms, then removes every saved snapshot file.
/// Any answer other than `y`/`yes` aborts with nothing deleted.
pub fn command_delete(store: &SnapshotStore) -> Result<(), Box<dyn std::error::Error>> {
    let numbers = store.list_numbers()?;
    if numbers.is_empty() {
        println!("No snapshots to delete in {}", store.dir().display());
        return Ok(());
    }

    print!(
        "Delete all {} snapshots in {}? [y/N] ",
        numbers.len(),
        store.dir().display()
    );
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim().to_lowercase();

    if input != "yes" && input != "y" {
        println!("Deletion cancelled.");
        return Ok(());
    }

    let deleted = store.delete_all()?;
    println!("Deleted {deleted} snapshot files.");
    Ok(())
}
