// wtport/src/reporter.rs
//! Console rendering of core `ReportEvent`s.

use wtport_core::{LogReporter, ReportEvent, Reporter};

use crate::ui::output_format::{info_msg, success_msg, warn_msg};
use crate::ui::theme::ThemeMap;

/// Mirrors every event to the log and, unless quiet, prints it to stderr.
pub struct ConsoleReporter<'a> {
    theme: &'a ThemeMap,
    quiet: bool,
    log: LogReporter,
}

impl<'a> ConsoleReporter<'a> {
    pub fn new(theme: &'a ThemeMap, quiet: bool) -> Self {
        Self { theme, quiet, log: LogReporter }
    }
}

impl Reporter for ConsoleReporter<'_> {
    fn report(&mut self, event: ReportEvent) {
        if self.quiet {
            self.log.report(event);
            return;
        }
        match &event {
            ReportEvent::AliasRemoved { .. } | ReportEvent::BackupCreated { .. } => {
                warn_msg(event.to_string(), self.theme)
            }
            ReportEvent::ArtifactWritten { .. } | ReportEvent::ManifestUpdated { .. } => {
                success_msg(event.to_string(), self.theme)
            }
            _ => info_msg(event.to_string(), self.theme),
        }
        self.log.report(event);
    }
}
