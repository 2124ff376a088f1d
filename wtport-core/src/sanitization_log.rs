// wtport-core/src/sanitization_log.rs
//! Append-only Markdown journal of sanitization runs.
//!
//! One bullet per run. An entry whose trimmed text already appears anywhere in
//! the log is not written again. Timestamps normally make every line unique,
//! so this only guards against replaying identical metadata.
//!
//! Bullets are consecutive lines with no blank line between runs. A log that
//! does not end in a newline gets exactly one before the next bullet.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::debug;

use crate::errors::Result;
use crate::paths::ensure_parent;

/// Timestamp format used in log lines, e.g. `2024-05-01 12:30:00Z`.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%SZ";

/// Formats a single log bullet (without trailing newline).
pub fn format_entry(source: &Path, destination: &Path, timestamp: DateTime<Utc>) -> String {
    format!(
        "- {}: Sanitized profile from {} to {}",
        timestamp.format(LOG_TIMESTAMP_FORMAT),
        source.display(),
        destination.display()
    )
}

/// Appends an entry to the log at `log_path`, creating the file and its parent
/// directory if absent. Returns `false` when the entry was already present.
pub fn append_entry(
    log_path: &Path,
    source: &Path,
    destination: &Path,
    timestamp: DateTime<Utc>,
) -> Result<bool> {
    let entry = format_entry(source, destination, timestamp);

    let content = if log_path.exists() { fs::read_to_string(log_path)? } else { String::new() };
    if content.contains(entry.trim()) {
        debug!("Log entry already present in {}; skipping", log_path.display());
        return Ok(false);
    }

    ensure_parent(log_path)?;

    let mut file = OpenOptions::new().create(true).append(true).open(log_path)?;
    if !content.is_empty() && !content.ends_with('\n') {
        file.write_all(b"\n")?;
    }
    writeln!(file, "{}", entry)?;
    file.flush()?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 5).unwrap()
    }

    #[test]
    fn entry_format() {
        let line = format_entry(Path::new("/home/me/.zshrc"), Path::new("artifacts/zshrc.portable"), ts());
        assert_eq!(
            line,
            "- 2024-05-01 08:00:05Z: Sanitized profile from /home/me/.zshrc to artifacts/zshrc.portable"
        );
    }

    #[test]
    fn identical_entry_is_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("docs").join("REPORT.md");
        let src = Path::new("src/.zshrc");
        let dst = Path::new("out/portable");

        assert!(append_entry(&log, src, dst, ts()).unwrap());
        assert!(!append_entry(&log, src, dst, ts()).unwrap());

        let content = fs::read_to_string(&log).unwrap();
        let line = format_entry(src, dst, ts());
        assert_eq!(content.matches(&line).count(), 1);
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn appends_after_content_missing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("REPORT.md");
        fs::write(&log, "# Sanitization report").unwrap();

        append_entry(&log, Path::new("a"), Path::new("b"), ts()).unwrap();

        let content = fs::read_to_string(&log).unwrap();
        assert_eq!(
            content,
            "# Sanitization report\n- 2024-05-01 08:00:05Z: Sanitized profile from a to b\n"
        );
    }

    #[test]
    fn consecutive_runs_are_not_separated_by_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("REPORT.md");
        let later = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();

        append_entry(&log, Path::new("a"), Path::new("b"), ts()).unwrap();
        append_entry(&log, Path::new("a"), Path::new("b"), later).unwrap();

        let content = fs::read_to_string(&log).unwrap();
        assert_eq!(
            content,
            "- 2024-05-01 08:00:05Z: Sanitized profile from a to b\n\
             - 2024-05-02 09:00:00Z: Sanitized profile from a to b\n"
        );
        assert!(!content.contains("\n\n"));
    }
}
