// File: wtport-core/src/pipeline.rs

//! `pipeline.rs`
//! One-shot, non-interactive profile sanitization.
//!
//! source file -> engine (rules, then alias denylist) -> destination file ->
//! SHA-256 of the written bytes -> manifest upsert -> log entry.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result as AnyResult;
use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::checksum::hash_file;
use crate::config::RuleConfig;
use crate::engine::SanitizationEngine;
use crate::engines::regex_engine::RegexEngine;
use crate::errors::{PortableError, Result};
use crate::manifest::{record_artifact, Manifest, ManifestEntry};
use crate::paths::{ensure_parent, ArtifactPaths};
use crate::report::{NullReporter, ReportEvent, Reporter};
use crate::sanitization_log;

/// Display name of the sanitized profile in the manifest.
pub const PORTABLE_PROFILE_NAME: &str = "Portable Zsh profile";

/// Where a sanitization run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeRequest {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub manifest_path: PathBuf,
    pub log_path: PathBuf,
    /// Manifest key for the destination (POSIX-style).
    pub artifact_path: String,
}

impl SanitizeRequest {
    /// A request using the default repository layout under `paths`.
    pub fn new(source: impl Into<PathBuf>, paths: &ArtifactPaths) -> Self {
        let destination = paths.portable_profile();
        Self {
            source: source.into(),
            artifact_path: paths.logical_path(&destination),
            destination,
            manifest_path: paths.manifest(),
            log_path: paths.sanitization_log(),
        }
    }

    /// Overrides the destination, recomputing its manifest key.
    pub fn with_destination(mut self, destination: impl Into<PathBuf>, paths: &ArtifactPaths) -> Self {
        self.destination = destination.into();
        self.artifact_path = paths.logical_path(&self.destination);
        self
    }
}

/// What a sanitization run produced.
#[derive(Debug, Clone)]
pub struct SanitizeOutcome {
    pub destination: PathBuf,
    pub sha256: String,
    pub original: String,
    pub sanitized: String,
    pub manifest: Manifest,
    pub log_appended: bool,
}

/// The default source profile: `~/.zshrc`.
pub fn default_source_profile() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".zshrc"))
}

/// Runs the full pipeline for one shell profile.
pub fn sanitize_profile(
    request: &SanitizeRequest,
    engine: &dyn SanitizationEngine,
    reporter: &mut dyn Reporter,
    now: DateTime<Utc>,
) -> Result<SanitizeOutcome> {
    if !request.source.is_file() {
        return Err(PortableError::not_found(&request.source, "Shell profile"));
    }
    info!("Sanitizing {}", request.source.display());

    let original = fs::read_to_string(&request.source)?;
    let sanitized = engine.sanitize(&original, reporter);

    ensure_parent(&request.destination)?;
    fs::write(&request.destination, &sanitized)?;
    let sha256 = hash_file(&request.destination)?;
    reporter.report(ReportEvent::ArtifactWritten {
        path: request.destination.clone(),
        sha256: sha256.clone(),
    });

    let entry = ManifestEntry::new(PORTABLE_PROFILE_NAME, &request.artifact_path, &sha256);
    let manifest = record_artifact(&request.manifest_path, &entry, now)?;
    reporter.report(ReportEvent::ManifestUpdated {
        path: request.manifest_path.clone(),
        artifact: request.artifact_path.clone(),
    });

    let log_appended = sanitization_log::append_entry(
        &request.log_path,
        &request.source,
        Path::new(&request.artifact_path),
        now,
    )?;
    reporter.report(if log_appended {
        ReportEvent::LogAppended { path: request.log_path.clone() }
    } else {
        ReportEvent::LogEntrySkipped { path: request.log_path.clone() }
    });

    debug!(
        "Sanitized {} bytes into {} bytes",
        original.len(),
        sanitized.len()
    );

    Ok(SanitizeOutcome {
        destination: request.destination.clone(),
        sha256,
        original,
        sanitized,
        manifest,
        log_appended,
    })
}

/// Sanitizes an in-memory string with the given rule configuration.
pub fn sanitize_string(config: RuleConfig, content: &str) -> AnyResult<String> {
    let engine = RegexEngine::new(config)?;
    Ok(engine.sanitize(content, &mut NullReporter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_string_with_defaults() {
        let config = RuleConfig::load_default_rules().unwrap();
        let out = sanitize_string(config, "alias sqlmap=sqlmap\nexport MAIL=me@corp.io").unwrap();
        assert_eq!(out, "export MAIL=user@example.com\n");
    }

    #[test]
    fn request_defaults_follow_layout() {
        let paths = ArtifactPaths::new("/repo");
        let req = SanitizeRequest::new("/home/me/.zshrc", &paths);
        assert_eq!(req.destination, PathBuf::from("/repo/artifacts/zshrc.portable"));
        assert_eq!(req.artifact_path, "artifacts/zshrc.portable");
        assert_eq!(req.log_path, PathBuf::from("/repo/docs/SANITIZATION_REPORT.md"));
    }
}
