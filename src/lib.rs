//! psdiff core library
//!
//! Captures point-in-time snapshots of the operating system's process
//! table and computes the symmetric difference between two snapshots (or
//! a snapshot and the live table) to surface process churn.
//!
//! The library carries the pieces with real invariants; the binary's CLI
//! glue sits on top of them:
//!
//! - **`record`**: the typed six-field process record
//! - **`scanner`**: /proc enumeration into records, skip-on-race semantics
//! - **`filter`**: noise exclusion (kernel workers, the invoking process)
//! - **`codec`**: the line-oriented, quote-escaped snapshot file format
//! - **`store`**: numbered snapshot files in a directory
//! - **`diff`**: symmetric set difference and the rendered change report
//!
//! # Usage
//!
//! ```no_run
//! use psdiff::{diff, SnapshotStore};
//!
//! let store = SnapshotStore::new(".psdiff", "ps", 10 * 1024 * 1024);
//! store.ensure_dir()?;
//!
//! let reference = store.load(0)?;
//! let current = psdiff::scanner::enumerate_processes(std::path::Path::new("/proc"))?;
//! println!("{}", diff(&reference, &current).render());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod diff;
pub mod filter;
pub mod record;
pub mod scanner;
pub mod store;

// Re-export main types for convenience
pub use diff::{diff, SnapshotDiff};
pub use filter::filter_processes;
pub use record::ProcessRecord;
pub use store::{SnapshotStore, StoreError};
