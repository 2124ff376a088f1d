// wtport-core/src/diagnostics.rs
//! Read-only health checks over an artifact repository.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::manifest::{load_manifest, validate_manifest};
use crate::paths::ArtifactPaths;
use crate::settings::load_settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticStatus {
    Ok,
    Missing,
    Error,
}

impl fmt::Display for DiagnosticStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiagnosticStatus::Ok => "ok",
            DiagnosticStatus::Missing => "missing",
            DiagnosticStatus::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticResult {
    pub name: String,
    pub status: DiagnosticStatus,
    pub details: String,
}

impl DiagnosticResult {
    fn new(name: impl Into<String>, status: DiagnosticStatus, details: impl Into<String>) -> Self {
        Self { name: name.into(), status, details: details.into() }
    }
}

/// Classifies the host. `kernel_release` is the content of `/proc/version`
/// (or equivalent); a Microsoft kernel on Linux means WSL.
pub fn classify_environment(os: &str, kernel_release: Option<&str>) -> String {
    match os {
        "windows" => "windows".to_string(),
        "linux" if kernel_release.is_some_and(|r| r.to_lowercase().contains("microsoft")) => {
            "wsl".to_string()
        }
        other => other.to_string(),
    }
}

pub fn detect_environment() -> String {
    let release = fs::read_to_string("/proc/version").ok();
    classify_environment(std::env::consts::OS, release.as_deref())
}

fn check_artifact(path: &Path, json: bool) -> DiagnosticResult {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    if !path.exists() {
        return DiagnosticResult::new(name, DiagnosticStatus::Missing, "File not found");
    }
    let outcome = if json {
        load_settings(path).map(|_| ())
    } else {
        fs::read(path).map(|_| ()).map_err(Into::into)
    };
    match outcome {
        Ok(()) => DiagnosticResult::new(name, DiagnosticStatus::Ok, "Readable"),
        Err(e) => DiagnosticResult::new(name, DiagnosticStatus::Error, e.to_string()),
    }
}

fn check_manifest(paths: &ArtifactPaths) -> Vec<DiagnosticResult> {
    let manifest_path = paths.manifest();
    let manifest = match load_manifest(&manifest_path) {
        Ok(Some(m)) => m,
        Ok(None) => {
            return vec![DiagnosticResult::new(
                "Manifest",
                DiagnosticStatus::Error,
                format!("{} missing", paths.logical_path(&manifest_path)),
            )];
        }
        Err(e) => return vec![DiagnosticResult::new("Manifest", DiagnosticStatus::Error, e.to_string())],
    };

    let settings = paths.logical_path(&paths.portable_settings());
    let profile = paths.logical_path(&paths.portable_profile());
    validate_manifest(&manifest, &[settings.as_str(), profile.as_str()])
        .into_iter()
        .map(|check| {
            if check.tracked {
                DiagnosticResult::new(check.path, DiagnosticStatus::Ok, "Present in manifest")
            } else {
                DiagnosticResult::new(check.path, DiagnosticStatus::Missing, "Not tracked in manifest")
            }
        })
        .collect()
}

/// Environment, artifact readability, then manifest tracking.
pub fn run_diagnostics(paths: &ArtifactPaths) -> Vec<DiagnosticResult> {
    let mut results = vec![DiagnosticResult::new(
        "Environment",
        DiagnosticStatus::Ok,
        detect_environment(),
    )];
    results.push(check_artifact(&paths.portable_settings(), true));
    results.push(check_artifact(&paths.portable_profile(), false));
    results.extend(check_manifest(paths));
    results
}
