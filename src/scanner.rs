//! Process table enumeration from the /proc filesystem.
//!
//! Scans numeric /proc entries and reads each pid's `status` and `cmdline`
//! files into typed records. Processes that vanish, deny access, or are
//! reaped between the directory scan and the detail read are skipped,
//! never surfaced as errors; live enumeration is inherently racy.

use crate::record::ProcessRecord;
use ahash::AHashMap as HashMap;
use nix::unistd::{Uid, User};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Why one /proc entry was left out of an enumeration.
#[derive(Debug, thiserror::Error)]
enum ScanSkip {
    /// A detail file vanished or was unreadable: the process exited
    /// mid-scan or denied access.
    #[error("unreadable: {0}")]
    Unreadable(std::io::Error),

    /// The status file was readable but missing a required field.
    #[error("malformed status file")]
    MalformedStatus,

    /// The process is in zombie state and about to be reaped.
    #[error("zombie")]
    Zombie,
}

/// Fields pulled from `/proc/<pid>/status`.
struct StatusFields {
    name: String,
    state: Option<char>,
    ppid: u32,
    uid: u32,
    gid: u32,
}

/// Parses the key/value lines of a `status` file. The `Uid:`/`Gid:` rows
/// carry four columns; the first (real id) is taken. Returns `None` when
/// any required field is absent.
fn parse_status(content: &str) -> Option<StatusFields> {
    let mut name = None;
    let mut state = None;
    let mut ppid = None;
    let mut uid = None;
    let mut gid = None;
    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let rest = rest.trim();
        match key {
            "Name" => name = Some(rest.to_string()),
            "State" => state = rest.chars().next(),
            "PPid" => ppid = rest.parse().ok(),
            "Uid" => uid = rest.split_whitespace().next().and_then(|v| v.parse().ok()),
            "Gid" => gid = rest.split_whitespace().next().and_then(|v| v.parse().ok()),
            _ => {}
        }
    }
    Some(StatusFields {
        name: name?,
        state,
        ppid: ppid?,
        uid: uid?,
        gid: gid?,
    })
}

/// Joins the NUL-separated argv from `/proc/<pid>/cmdline` into a single
/// string. Tokens that are empty or whitespace-only are dropped; the rest
/// join with single spaces and are not re-escaped, so embedded quotes
/// stay as the process supplied them. Kernel threads yield the empty
/// string.
fn flatten_cmdline(raw: &[u8]) -> String {
    raw.split(|&b| b == 0)
        .filter_map(|tok| std::str::from_utf8(tok).ok())
        .filter(|tok| !tok.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves a uid to a user name, caching lookups for the duration of one
/// scan. A uid without a passwd entry yields the empty string.
fn resolve_username(uid: u32, cache: &mut HashMap<u32, String>) -> String {
    if let Some(name) = cache.get(&uid) {
        return name.clone();
    }
    let name = match User::from_uid(Uid::from_raw(uid)) {
        Ok(Some(user)) => user.name,
        Ok(None) | Err(_) => String::new(),
    };
    cache.insert(uid, name.clone());
    name
}

/// Reads one pid's detail files into a record, or reports why it was
/// skipped.
fn read_process(
    proc_path: &Path,
    pid: u32,
    usernames: &mut HashMap<u32, String>,
) -> Result<ProcessRecord, ScanSkip> {
    let status_raw =
        fs::read_to_string(proc_path.join("status")).map_err(ScanSkip::Unreadable)?;
    let status = parse_status(&status_raw).ok_or(ScanSkip::MalformedStatus)?;
    if status.state == Some('Z') {
        return Err(ScanSkip::Zombie);
    }
    let cmdline_raw = fs::read(proc_path.join("cmdline")).map_err(ScanSkip::Unreadable)?;

    Ok(ProcessRecord {
        pid,
        ppid: status.ppid,
        gid: status.gid,
        username: resolve_username(status.uid, usernames),
        name: status.name,
        cmdline: flatten_cmdline(&cmdline_raw),
    })
}

/// Enumerates the process table under `root` (normally `/proc`).
///
/// Directory entries without an all-digit name are not processes and are
/// ignored. Per-pid read failures are skips, logged at debug level; only
/// failing to list `root` itself is an error. Records come back
/// unordered.
pub fn enumerate_processes(root: &Path) -> std::io::Result<Vec<ProcessRecord>> {
    let mut usernames = HashMap::new();
    let mut records = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        let name = match path.file_name().and_then(|s| s.to_str()) {
            Some(v) => v,
            None => continue,
        };
        if !name.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let pid: u32 = match name.parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        match read_process(&path, pid, &mut usernames) {
            Ok(record) => records.push(record),
            Err(skip) => debug!("skipping pid {}: {}", pid, skip),
        }
    }
    Ok(records)
}
