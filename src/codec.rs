//! Line-oriented snapshot codec.
//!
//! One record per line, six whitespace-separated fields in fixed order
//! `pid ppid gid username name cmdline`. The three string fields are
//! written as single-quoted shell words so embedded spaces and quote
//! characters survive a round trip; reading splits with shell-word
//! semantics and accepts single or double quotes. Column padding is
//! cosmetic only.

use crate::record::ProcessRecord;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Quotes one string field as a single shell word.
///
/// The field is always wrapped in single quotes; an interior `'` closes
/// the quote, emits a backslash-escaped quote, and reopens (`'\''`). The
/// empty string encodes as `''`, never as a missing token.
///
/// `decode_line` splits with [`shell_words::split`], which inverts this
/// exactly: `split(&quote_field(s))` yields `s` for any `s` without a
/// line break.
pub fn quote_field(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(c);
        }
    }
    out.push('\'');
    out
}

/// Encodes a record as one snapshot line.
///
/// Numeric columns are right-aligned and the quoted username/name columns
/// left-aligned for operator readability; the decoder splits on
/// whitespace runs, so the padding carries no meaning.
pub fn encode_record(record: &ProcessRecord) -> String {
    format!(
        "{:>6} {:>6} {:>6} {:<8} {:<24} {}",
        record.pid,
        record.ppid,
        record.gid,
        quote_field(&record.username),
        quote_field(&record.name),
        quote_field(&record.cmdline),
    )
}

/// Decodes one snapshot line.
///
/// Returns `None` for corrupt lines: a shell-word split failure
/// (unbalanced quote), fewer than six fields, or a non-integer
/// pid/ppid/gid. Callers skip such lines and keep reading.
pub fn decode_line(line: &str) -> Option<ProcessRecord> {
    let words = shell_words::split(line).ok()?;
    if words.len() < 6 {
        return None;
    }
    let mut words = words.into_iter();
    let pid = words.next()?.parse().ok()?;
    let ppid = words.next()?.parse().ok()?;
    let gid = words.next()?.parse().ok()?;
    Some(ProcessRecord {
        pid,
        ppid,
        gid,
        username: words.next()?,
        name: words.next()?,
        cmdline: words.next()?,
    })
}

/// Reads a snapshot file, one record per line, sorted ascending by pid.
///
/// Corrupt lines are skipped with a debug log instead of failing the
/// read; this also covers a truncated trailing line left by a writer
/// that died mid-snapshot.
pub fn read_snapshot(path: &Path) -> std::io::Result<Vec<ProcessRecord>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match decode_line(&line) {
            Some(record) => records.push(record),
            None => debug!(
                "skipping corrupt line {} in {}",
                lineno + 1,
                path.display()
            ),
        }
    }
    records.sort_by_key(|r| r.pid);
    Ok(records)
}

/// Writes records one encoded line per record, no header or footer.
///
/// The write is not atomic; a crash can leave a truncated tail, which
/// `read_snapshot` tolerates.
pub fn write_snapshot(path: &Path, records: &[ProcessRecord]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        writeln!(writer, "{}", encode_record(record))?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(pid: u32, username: &str, name: &str, cmdline: &str) -> ProcessRecord {
        ProcessRecord {
            pid,
            ppid: 2,
            gid: 1000,
            username: username.to_string(),
            name: name.to_string(),
            cmdline: cmdline.to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // Tests for quote_field
    // -------------------------------------------------------------------------

    #[test]
    fn test_quote_field_plain() {
        assert_eq!(quote_field("nginx"), "'nginx'");
    }

    #[test]
    fn test_quote_field_empty_is_explicit() {
        assert_eq!(quote_field(""), "''");
    }

    #[test]
    fn test_quote_field_spaces() {
        assert_eq!(quote_field("nginx: worker process"), "'nginx: worker process'");
    }

    #[test]
    fn test_quote_field_single_quote() {
        assert_eq!(quote_field("it's"), "'it'\\''s'");
    }

    #[test]
    fn test_quote_field_split_inverts() {
        let inputs = [
            "plain",
            "with space",
            "it's quoted",
            "say \"hi\"",
            "   ",
            "'leading quote",
            "trailing quote'",
            "''",
            "mix 'of' \"both\"",
        ];
        for input in inputs {
            let words = shell_words::split(&quote_field(input)).expect("quoted field must split");
            assert_eq!(words, vec![input.to_string()], "round trip of {input:?}");
        }
    }

    // -------------------------------------------------------------------------
    // Tests for encode_record / decode_line
    // -------------------------------------------------------------------------

    #[test]
    fn test_record_round_trip_plain() {
        let r = record(640, "root", "mt76 phy0", "bin -c");
        assert_eq!(decode_line(&encode_record(&r)), Some(r));
    }

    #[test]
    fn test_record_round_trip_quotes_and_empty() {
        let cases = [
            record(1, "", "", ""),
            record(2, "root", "'process'", "hello"),
            record(3, "daemon", "say \"hi\"", "cmd \"2\""),
            record(4, "a b", "   ", "x 'y' z"),
        ];
        for r in cases {
            assert_eq!(decode_line(&encode_record(&r)), Some(r.clone()), "{r:?}");
        }
    }

    #[test]
    fn test_decode_padding_not_significant() {
        let r = record(9, "root", "a", "b");
        let line = encode_record(&r);
        let squeezed: String = line.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(decode_line(&squeezed), Some(r.clone()));
        let padded = format!("      {}   ", line);
        assert_eq!(decode_line(&padded), Some(r));
    }

    #[test]
    fn test_decode_accepts_double_quotes() {
        let line = "10 2 0 \"root\" \"nginx: worker\" \"nginx -g daemon\"";
        let r = decode_line(line).expect("double-quoted line must decode");
        assert_eq!(r.name, "nginx: worker");
        assert_eq!(r.cmdline, "nginx -g daemon");
    }

    #[test]
    fn test_decode_too_few_fields() {
        assert_eq!(decode_line("1 2 3 'root' 'name'"), None);
        assert_eq!(decode_line(""), None);
    }

    #[test]
    fn test_decode_non_integer_numeric_field() {
        assert_eq!(decode_line("x 2 3 'root' 'name' 'cmd'"), None);
        assert_eq!(decode_line("1 y 3 'root' 'name' 'cmd'"), None);
        assert_eq!(decode_line("1 2 z 'root' 'name' 'cmd'"), None);
    }

    #[test]
    fn test_decode_unbalanced_quote() {
        assert_eq!(decode_line("1 2 3 'root' 'name' 'cmd"), None);
    }

    // -------------------------------------------------------------------------
    // Tests for read_snapshot / write_snapshot
    // -------------------------------------------------------------------------

    #[test]
    fn test_file_round_trip_sorted() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("ps.0");

        let records = vec![
            record(300, "root", "late", "c"),
            record(10, "root", "early", "a"),
            record(42, "daemon", "it's", "say \"hi\""),
        ];
        write_snapshot(&path, &records).expect("write must succeed");

        let loaded = read_snapshot(&path).expect("read must succeed");
        let pids: Vec<u32> = loaded.iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![10, 42, 300]);
        assert!(loaded.contains(&records[2]));
    }

    #[test]
    fn test_read_skips_corrupt_and_truncated_lines() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("ps.0");

        let good = encode_record(&record(5, "root", "ok", "fine"));
        let content = format!(
            "{good}\nnot a record\n1 2 x 'bad' 'gid' 'field'\n     7      1      0 'root' 'trunc",
        );
        std::fs::write(&path, content).expect("Failed to write snapshot file");

        let loaded = read_snapshot(&path).expect("read must succeed");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].pid, 5);
    }
}
