//! Typed process record shared by the scanner, codec, and diff engine.
//!
//! The raw per-pid files under /proc are mapped into this struct as early
//! as possible; no downstream component works on loose string maps.

/// One process's observable attributes at snapshot time.
///
/// Equality and hashing cover the full field tuple. Two snapshots can both
/// contain a pid whose other fields changed in between; the diff engine
/// reports that as a removal plus an addition, not as a modification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessRecord {
    pub pid: u32,
    pub ppid: u32,
    /// Real group id of the process owner.
    pub gid: u32,
    /// Owning user name; empty when the uid has no passwd entry.
    pub username: String,
    /// Executable/display name; may contain spaces or quote characters.
    pub name: String,
    /// Command line flattened to a single string (argv joined with spaces).
    pub cmdline: String,
}

impl ProcessRecord {
    /// Renders the human-readable listing line: right-aligned numeric
    /// columns (width 6), left-aligned username (width 8) and name
    /// (width 24), raw cmdline last. Empty name/cmdline show as `""` so
    /// the column is never silently blank.
    pub fn display_line(&self) -> String {
        let name = if self.name.is_empty() {
            "\"\""
        } else {
            self.name.as_str()
        };
        let cmdline = if self.cmdline.is_empty() {
            "\"\""
        } else {
            self.cmdline.as_str()
        };
        format!(
            "{:>6} {:>6} {:>6} {:<8} {:<24} {}",
            self.pid, self.ppid, self.gid, self.username, name, cmdline
        )
    }
}
