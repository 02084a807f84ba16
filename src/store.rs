//! Numbered snapshot files in a single directory.
//!
//! Snapshots live as `<prefix>.<N>` files; the store allocates sequence
//! numbers, resolves numbers to paths, and performs the bulk delete and
//! the advisory size check. No locking: two concurrent invocations can
//! race on `next_number`, which is an accepted limitation.

use crate::codec;
use crate::record::ProcessRecord;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from snapshot store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot {number} does not exist: {}", path.display())]
    NotFound { number: u64, path: PathBuf },

    #[error("no snapshots found in {}", dir.display())]
    NoSnapshots { dir: PathBuf },

    #[error("invalid snapshot number: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Store managing the snapshot files of one directory.
///
/// Directory, filename prefix, and the advisory size threshold arrive
/// explicitly through the constructor; the store keeps no ambient state.
pub struct SnapshotStore {
    dir: PathBuf,
    prefix: String,
    max_bytes: u64,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, max_bytes: u64) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            max_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the snapshot directory if it does not exist yet.
    pub fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// Extracts N from a `<prefix>.<N>` filename; `None` for anything else
    /// (foreign files, non-numeric suffixes).
    fn parse_number(&self, file_name: &str) -> Option<u64> {
        file_name
            .strip_prefix(&self.prefix)?
            .strip_prefix('.')?
            .parse()
            .ok()
    }

    /// Existing snapshot numbers, ascending. Non-numeric suffixes are
    /// ignored, not errors.
    pub fn list_numbers(&self) -> io::Result<Vec<u64>> {
        let mut numbers = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if let Some(number) = self.parse_number(name) {
                    numbers.push(number);
                }
            }
        }
        numbers.sort_unstable();
        Ok(numbers)
    }

    /// Highest existing snapshot number, or `None` before the first save.
    pub fn latest_number(&self) -> io::Result<Option<u64>> {
        Ok(self.list_numbers()?.into_iter().max())
    }

    /// Next free sequence number: max existing + 1, or 0 when none exist.
    pub fn next_number(&self) -> io::Result<u64> {
        Ok(match self.latest_number()? {
            Some(last) => last + 1,
            None => 0,
        })
    }

    /// Path a snapshot number maps to, whether or not the file exists.
    pub fn path_for(&self, number: u64) -> PathBuf {
        self.dir.join(format!("{}.{}", self.prefix, number))
    }

    /// Path of an existing snapshot; `NotFound` when the file is absent.
    pub fn resolve(&self, number: u64) -> Result<PathBuf, StoreError> {
        let path = self.path_for(number);
        if !path.exists() {
            return Err(StoreError::NotFound { number, path });
        }
        Ok(path)
    }

    /// Loads snapshot `number`; corrupt lines are skipped by the codec.
    pub fn load(&self, number: u64) -> Result<Vec<ProcessRecord>, StoreError> {
        let path = self.resolve(number)?;
        Ok(codec::read_snapshot(&path)?)
    }

    /// Saves records under `explicit`, or under the next free number when
    /// `None`. Negative explicit numbers are rejected. Returns the path
    /// written. The write is not atomic and an existing file under the
    /// same number is overwritten.
    pub fn save(
        &self,
        records: &[ProcessRecord],
        explicit: Option<i64>,
    ) -> Result<PathBuf, StoreError> {
        let number = match explicit {
            Some(n) if n < 0 => {
                return Err(StoreError::InvalidArgument(format!(
                    "snapshot number must be non-negative, got {n}"
                )));
            }
            Some(n) => n as u64,
            None => self.next_number()?,
        };
        let path = self.path_for(number);
        codec::write_snapshot(&path, records)?;
        debug!("snapshot {} written to {}", number, path.display());
        Ok(path)
    }

    /// Best-effort bulk delete of every `<prefix>.*` file in the
    /// directory. Non-file entries are ignored; a failure on one file is
    /// logged and the sweep continues. Returns how many files went.
    pub fn delete_all(&self) -> io::Result<usize> {
        let file_prefix = format!("{}.", self.prefix);
        let mut deleted = 0;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !name.starts_with(&file_prefix) {
                continue;
            }
            let path = entry.path();
            match fs::remove_file(&path) {
                Ok(()) => deleted += 1,
                Err(e) => warn!("could not delete {}: {}", path.display(), e),
            }
        }
        Ok(deleted)
    }

    /// Advisory size check over the directory's files. Exceeding the
    /// threshold emits a warning; the surrounding operation proceeds
    /// either way.
    pub fn maintenance_check(&self) {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("maintenance check skipped: {}", e);
                return;
            }
        };
        let mut size_bytes = 0u64;
        for entry in entries.flatten() {
            if let Ok(meta) = entry.metadata() {
                if meta.is_file() {
                    size_bytes += meta.len();
                }
            }
        }
        if size_bytes > self.max_bytes {
            warn!(
                "snapshot directory {} holds {} bytes (threshold {}); consider deleting old snapshots",
                self.dir.display(),
                size_bytes,
                self.max_bytes
            );
        }
    }
}
