//! Symmetric set difference between two process record collections.

use crate::record::ProcessRecord;
use ahash::AHashSet as HashSet;

/// Result of comparing an older collection A against a newer collection B:
/// records only in A (`removed`) and records only in B (`added`), each
/// sorted ascending by pid.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SnapshotDiff {
    pub removed: Vec<ProcessRecord>,
    pub added: Vec<ProcessRecord>,
}

impl SnapshotDiff {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }

    /// Renders the change report: `- ` lines for removals first, then `+ `
    /// lines for additions, in the display-line format. An empty diff
    /// renders as the single line `No differences found.`
    pub fn render(&self) -> String {
        if self.is_empty() {
            return "No differences found.".to_string();
        }
        let mut lines = Vec::with_capacity(self.removed.len() + self.added.len());
        for record in &self.removed {
            lines.push(format!("- {}", record.display_line()));
        }
        for record in &self.added {
            lines.push(format!("+ {}", record.display_line()));
        }
        lines.join("\n")
    }
}

/// Computes the symmetric difference between collections `a` (reference)
/// and `b` (current).
///
/// Equality is the full field tuple, never pid alone: a pid present on
/// both sides whose other fields changed contributes one removal and one
/// addition. Duplicate pids within one collection are tolerated; they
/// collapse in the set and never panic.
pub fn diff(a: &[ProcessRecord], b: &[ProcessRecord]) -> SnapshotDiff {
    let set_a: HashSet<&ProcessRecord> = a.iter().collect();
    let set_b: HashSet<&ProcessRecord> = b.iter().collect();

    let mut removed: Vec<ProcessRecord> =
        set_a.difference(&set_b).map(|r| (*r).clone()).collect();
    let mut added: Vec<ProcessRecord> =
        set_b.difference(&set_a).map(|r| (*r).clone()).collect();

    removed.sort_by_key(|r| r.pid);
    added.sort_by_key(|r| r.pid);

    SnapshotDiff { removed, added }
}
