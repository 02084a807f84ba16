//! Noise filtering applied to a raw enumeration before it becomes a snapshot.

use crate::record::ProcessRecord;

/// Name prefix shared by kernel worker threads.
const KWORKER_PREFIX: &str = "kworker/";

/// Drops root-owned kernel worker threads and the invoking process itself,
/// so transient kworkers and the tool's own pid never show up as churn.
/// Everything else passes through unchanged; ordering is imposed later.
pub fn filter_processes(records: Vec<ProcessRecord>, own_pid: u32) -> Vec<ProcessRecord> {
    records
        .into_iter()
        .filter(|r| !(r.name.starts_with(KWORKER_PREFIX) && r.username == "root"))
        .filter(|r| r.pid != own_pid)
        .collect()
}
