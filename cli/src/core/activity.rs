//! # Programidex Activity Log
//!
//! File: cli/src/core/activity.rs
//!
//! ## Overview
//!
//! Every decision and side effect of a session is appended to a plain-text
//! log that lives next to the blueprint document (`.dex/dex.log`). Lines look
//! like:
//!
//! ```text
//! [programidex][2026-10-17T09:14:03+02:00] Created cmd/
//! ```
//!
//! The log is an operator-facing record, not diagnostics: diagnostics go
//! through `tracing`. Each recorded message is also emitted as an `info!`
//! event so `-v` shows it on stderr.
//!
//! Writing the log never fails a flow. If the file cannot be appended to, a
//! `warn!` is emitted and the session continues.
//!
use crate::common::fs::io;
use crate::core::config::Settings;
use chrono::{DateTime, Local, SecondsFormat, TimeZone};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Append-only project log.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
    component: String,
}

impl ActivityLog {
    pub fn new(path: impl Into<PathBuf>, component: impl Into<String>) -> Self {
        ActivityLog {
            path: path.into(),
            component: component.into(),
        }
    }

    /// Log for the project rooted at `root`.
    pub fn for_project(root: &Path, settings: &Settings) -> Self {
        ActivityLog::new(settings.log_path(root), settings.bookkeeping.component.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `message` with the current local time.
    pub fn record(&self, message: &str) {
        info!("{}", message);
        let line = format_line(&self.component, &Local::now(), message);
        if let Err(e) = self.append(&line) {
            warn!(
                "Could not write activity log {}: {:#}",
                self.path.display(),
                e
            );
        }
    }

    fn append(&self, line: &str) -> crate::core::error::Result<()> {
        if let Some(parent) = self.path.parent() {
            io::ensure_dir_exists(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Formats one log line: `[component][RFC3339 timestamp] message\n`.
pub fn format_line<Tz: TimeZone>(component: &str, at: &DateTime<Tz>, message: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "[{}][{}] {}\n",
        component,
        at.to_rfc3339_opts(SecondsFormat::Secs, true),
        message
    )
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_format_line_uses_rfc3339() {
        let at = Utc.with_ymd_and_hms(2026, 10, 17, 9, 14, 3).unwrap();
        assert_eq!(
            format_line("programidex", &at, "Saved configuration."),
            "[programidex][2026-10-17T09:14:03Z] Saved configuration.\n"
        );

        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2026, 10, 17, 9, 14, 3).unwrap();
        assert_eq!(
            format_line("programidex", &local, "x"),
            "[programidex][2026-10-17T09:14:03+02:00] x\n"
        );
    }

    #[test]
    fn test_record_appends_lines_and_creates_directory() {
        let dir = tempdir().unwrap();
        let log = ActivityLog::for_project(dir.path(), &Settings::default());
        log.record("first");
        log.record("second");
        let content = fs::read_to_string(dir.path().join(".dex/dex.log")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[programidex]["));
        assert!(lines[0].ends_with("] first"));
        assert!(lines[1].ends_with("] second"));
    }

    #[test]
    fn test_record_failure_is_not_fatal() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let log = ActivityLog::new(blocker.join("dex.log"), "programidex");
        log.record("goes nowhere");
        assert!(!blocker.join("dex.log").exists());
    }
}
