//! Append-only diagnostic log.
//!
//! Each failure a sentinel operation swallows is recorded as one line,
//! `<ctime timestamp>: <message>`, e.g.
//! `Tue Oct 14 09:12:03 2026: ReadRow: sheet 'Trades' not found`.
//! The same message goes to the `log` facade at warn level.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

/// `ctime(3)` layout
const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// A diagnostic log file
#[derive(Debug, Clone)]
pub struct DiagnosticLog {
    path: PathBuf,
}

impl DiagnosticLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line. Failing to write the log is never an error.
    pub fn record(&self, message: &str) {
        log::warn!("{}", message);

        let line = format!("{}: {}\n", Local::now().format(TIMESTAMP_FORMAT), message);
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(e) = written {
            log::debug!(
                "could not append to diagnostic log {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_appends_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = DiagnosticLog::new(dir.path().join("error_log.txt"));

        log.record("first");
        log.record("second");

        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(": first"));
        assert!(lines[1].ends_with(": second"));

        // "Tue Oct 14 09:12:03 2026" is 24 characters
        let (stamp, _) = lines[0].split_once(": ").unwrap();
        assert_eq!(stamp.len(), 24);
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_unwritable_log_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let log = DiagnosticLog::new(dir.path().join("missing").join("log.txt"));
        log.record("dropped");
        assert!(!log.path().exists());
    }
}
