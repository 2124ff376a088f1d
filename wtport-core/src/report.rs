// wtport-core/src/report.rs
//! Observability events emitted by the sanitization pipeline.
//!
//! Operations never print directly. They hand `ReportEvent`s to an injected
//! `Reporter`, which the CLI renders to the console and tests record for
//! assertions. Events are informational only and never affect control flow.

use std::fmt;
use std::path::PathBuf;

use log::info;
use serde::Serialize;

/// A single informational event raised while transforming or writing artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReportEvent {
    /// A rule replaced at least one match.
    RuleApplied { rule: String, count: usize },
    /// A denylisted alias line was dropped.
    AliasRemoved { name: String },
    /// A sanitized artifact was written to disk.
    ArtifactWritten { path: PathBuf, sha256: String },
    /// The manifest was saved with an entry for `artifact`.
    ManifestUpdated { path: PathBuf, artifact: String },
    /// A line was appended to the sanitization log.
    LogAppended { path: PathBuf },
    /// The log already contained the candidate line.
    LogEntrySkipped { path: PathBuf },
    /// An existing file was copied aside before being overwritten.
    BackupCreated { source: PathBuf, backup: PathBuf },
    /// Free-form operator notice (dry-run previews, skipped entries).
    Notice(String),
}

impl fmt::Display for ReportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportEvent::RuleApplied { rule, count } => {
                write!(f, "Applied rule {}: {} substitutions", rule, count)
            }
            ReportEvent::AliasRemoved { name } => write!(f, "Removed sensitive alias: {}", name),
            ReportEvent::ArtifactWritten { path, sha256 } => {
                write!(f, "Wrote {} (sha256={})", path.display(), sha256)
            }
            ReportEvent::ManifestUpdated { path, artifact } => {
                write!(f, "Updated manifest {} for {}", path.display(), artifact)
            }
            ReportEvent::LogAppended { path } => write!(f, "Appended log entry to {}", path.display()),
            ReportEvent::LogEntrySkipped { path } => {
                write!(f, "Log entry already present in {}", path.display())
            }
            ReportEvent::BackupCreated { source, backup } => {
                write!(f, "Backup {} -> {}", source.display(), backup.display())
            }
            ReportEvent::Notice(msg) => f.write_str(msg),
        }
    }
}

/// Sink for pipeline events.
pub trait Reporter {
    fn report(&mut self, event: ReportEvent);
}

/// Forwards every event to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, event: ReportEvent) {
        info!(target: "wtport_core::report", "{}", event);
    }
}

/// Keeps events in memory, in emission order.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    pub events: Vec<ReportEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the rules that fired, in order.
    pub fn rules_applied(&self) -> Vec<(&str, usize)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::RuleApplied { rule, count } => Some((rule.as_str(), *count)),
                _ => None,
            })
            .collect()
    }

    pub fn aliases_removed(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::AliasRemoved { name } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: ReportEvent) {
        self.events.push(event);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _event: ReportEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_console_wording() {
        let e = ReportEvent::RuleApplied { rule: "Drop tokens".into(), count: 2 };
        assert_eq!(e.to_string(), "Applied rule Drop tokens: 2 substitutions");
        let e = ReportEvent::AliasRemoved { name: "hydra".into() };
        assert_eq!(e.to_string(), "Removed sensitive alias: hydra");
    }

    #[test]
    fn recording_reporter_keeps_order() {
        let mut r = RecordingReporter::new();
        r.report(ReportEvent::AliasRemoved { name: "john".into() });
        r.report(ReportEvent::RuleApplied { rule: "x".into(), count: 1 });
        r.report(ReportEvent::AliasRemoved { name: "hydra".into() });
        assert_eq!(r.aliases_removed(), ["john", "hydra"]);
        assert_eq!(r.rules_applied(), [("x", 1)]);
    }
}
