// wtport-core/src/settings.rs
//! Windows Terminal `settings.json` handling.
//!
//! Locating the live settings file, normalizing machine-specific values out of
//! it for export, vendoring profile icons, and injecting the portable profile
//! back in on apply.
//!
//! License: MIT OR APACHE 2.0

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde_json::{json, Map, Value};

use crate::checksum::hash_file;
use crate::errors::{PortableError, Result};
use crate::manifest::{record_artifact, ManifestEntry};
use crate::paths::{ensure_parent, ArtifactPaths, ASSETS_DIR};
use crate::report::{ReportEvent, Reporter};

pub const SETTINGS_ARTIFACT_NAME: &str = "Windows Terminal settings";
pub const PORTABLE_PROFILE_GUID: &str = "{6fd0b4a5-95a6-46ed-9ad4-71fb4c6d9d25}";
pub const PORTABLE_PROFILE_DISPLAY_NAME: &str = "Portable zsh";
pub const WSL_COMMANDLINE: &str = "wsl.exe -d Ubuntu-22.04 --exec /bin/zsh";
pub const WSL_STARTING_DIRECTORY: &str = "\\\\wsl$\\Ubuntu-22.04\\home\\$USER";
pub const PORTABLE_PROFILE_ICON: &str = "ms-appdata:///roaming/wtport-portable.png";

/// Candidate settings locations relative to `%LOCALAPPDATA%`, in lookup order.
pub fn settings_candidates(local_app_data: &Path) -> Vec<PathBuf> {
    vec![
        local_app_data
            .join("Packages")
            .join("Microsoft.WindowsTerminal_8wekyb3d8bbwe")
            .join("LocalState")
            .join("settings.json"),
        local_app_data
            .join("Packages")
            .join("Microsoft.WindowsTerminalPreview_8wekyb3d8bbwe")
            .join("LocalState")
            .join("settings.json"),
        local_app_data.join("Microsoft").join("Windows Terminal").join("settings.json"),
    ]
}

/// Finds the live settings file. `local_app_data` is normally `%LOCALAPPDATA%`.
pub fn resolve_settings_path(local_app_data: Option<&Path>) -> Result<PathBuf> {
    let Some(base) = local_app_data else {
        return Err(PortableError::not_found("%LOCALAPPDATA%", "LOCALAPPDATA environment variable"));
    };
    settings_candidates(base)
        .into_iter()
        .find(|candidate| candidate.exists())
        .ok_or_else(|| PortableError::not_found(base, "Windows Terminal settings.json"))
}

/// Loads a JSON document whose top level must be an object.
pub fn load_settings(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        return Err(PortableError::not_found(path, "Settings file"));
    }
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)
        .map_err(|e| PortableError::data(path, format!("not valid JSON: {}", e)))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(PortableError::data(path, "expected a JSON object at the top level")),
    }
}

/// Writes pretty JSON (2-space indent) with a trailing newline.
pub fn write_settings(path: &Path, settings: &Map<String, Value>) -> Result<()> {
    ensure_parent(path)?;
    let mut text = serde_json::to_string_pretty(settings)?;
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}

fn profile_list_mut(settings: &mut Map<String, Value>) -> Option<&mut Vec<Value>> {
    settings.get_mut("profiles")?.as_object_mut()?.get_mut("list")?.as_array_mut()
}

/// Strips machine-specific values from every profile in `profiles.list`.
pub fn sanitize_settings(
    mut settings: Map<String, Value>,
    home: Option<&Path>,
    reporter: &mut dyn Reporter,
) -> Map<String, Value> {
    let home = home.map(|h| h.to_string_lossy().into_owned()).filter(|h| !h.is_empty());
    let Some(list) = profile_list_mut(&mut settings) else {
        return settings;
    };

    for profile in list.iter_mut() {
        let Some(profile) = profile.as_object_mut() else {
            reporter.report(ReportEvent::Notice("Skipping non-object profile entry".into()));
            continue;
        };

        if let (Some(home), Some(Value::String(dir))) = (&home, profile.get_mut("startingDirectory")) {
            *dir = dir.replace(home.as_str(), "$HOME");
        }

        let needs_wsl = matches!(
            profile.get("commandline"),
            Some(Value::String(cmd)) if !cmd.to_lowercase().contains(".exe")
        );
        if needs_wsl {
            profile.insert("commandline".into(), Value::String(WSL_COMMANDLINE.into()));
        }

        profile.entry("hidden").or_insert(Value::Bool(false));
    }
    settings
}

/// Copies local `C:` icon files into `assets_dir` and points the profiles at
/// the vendored copies. Returns the copied files.
pub fn copy_assets(settings: &mut Map<String, Value>, assets_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    let Some(list) = profile_list_mut(settings) else {
        return Ok(copied);
    };

    for profile in list.iter_mut().filter_map(Value::as_object_mut) {
        let Some(Value::String(icon)) = profile.get("icon") else { continue };
        if !icon.starts_with("C:") {
            continue;
        }
        // Windows paths need backslash handling on non-Windows hosts too.
        let icon_path = PathBuf::from(icon.replace('\\', std::path::MAIN_SEPARATOR_STR));
        let Some(file_name) = icon_path.file_name().map(|n| n.to_owned()) else { continue };
        if !icon_path.exists() {
            debug!("Icon {} does not exist, leaving as is", icon_path.display());
            continue;
        }

        fs::create_dir_all(assets_dir)?;
        let destination = assets_dir.join(&file_name);
        fs::copy(&icon_path, &destination)?;
        let vendored = format!("{}/{}", ASSETS_DIR, file_name.to_string_lossy());
        profile.insert("icon".into(), Value::String(vendored));
        copied.push(destination);
    }
    Ok(copied)
}

/// Inserts or refreshes the portable profile. With `set_default`, it also
/// becomes `defaultProfile`.
pub fn ensure_portable_profile(
    mut settings: Map<String, Value>,
    set_default: bool,
    origin: &Path,
) -> Result<Map<String, Value>> {
    let profiles = settings.entry("profiles").or_insert_with(|| json!({}));
    let Some(profiles) = profiles.as_object_mut() else {
        return Err(PortableError::data(origin, "`profiles` section must be an object"));
    };
    let list = profiles.entry("list").or_insert_with(|| json!([]));
    let Some(list) = list.as_array_mut() else {
        return Err(PortableError::data(origin, "`profiles.list` must be an array"));
    };

    let existing = list.iter_mut().filter_map(Value::as_object_mut).find(|p| {
        p.get("guid").and_then(Value::as_str) == Some(PORTABLE_PROFILE_GUID)
    });

    match existing {
        Some(profile) => {
            profile.insert("name".into(), json!(PORTABLE_PROFILE_DISPLAY_NAME));
            profile.insert("commandline".into(), json!(WSL_COMMANDLINE));
            profile.insert("startingDirectory".into(), json!(WSL_STARTING_DIRECTORY));
            profile.insert("hidden".into(), json!(false));
        }
        None => list.push(json!({
            "name": PORTABLE_PROFILE_DISPLAY_NAME,
            "guid": PORTABLE_PROFILE_GUID,
            "commandline": WSL_COMMANDLINE,
            "startingDirectory": WSL_STARTING_DIRECTORY,
            "icon": PORTABLE_PROFILE_ICON,
            "hidden": false,
        })),
    }

    if set_default {
        settings.insert("defaultProfile".into(), json!(PORTABLE_PROFILE_GUID));
    }
    Ok(settings)
}

/// What `export_settings` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub checksum: String,
    pub assets: Vec<PathBuf>,
}

/// Reads the live settings, normalizes them, vendors icons, writes the
/// portable copy and records it in the manifest.
pub fn export_settings(
    source: &Path,
    destination: &Path,
    paths: &ArtifactPaths,
    manifest_path: &Path,
    reporter: &mut dyn Reporter,
    now: DateTime<Utc>,
) -> Result<ExportResult> {
    info!("Reading Windows Terminal settings from {}", source.display());
    let home = dirs::home_dir();
    let mut settings = sanitize_settings(load_settings(source)?, home.as_deref(), reporter);

    let assets = copy_assets(&mut settings, &paths.assets_dir())?;
    if !assets.is_empty() {
        let names: Vec<String> = assets
            .iter()
            .filter_map(|a| a.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        reporter.report(ReportEvent::Notice(format!("Copied assets: {}", names.join(", "))));
    }

    write_settings(destination, &settings)?;
    let checksum = hash_file(destination)?;
    reporter.report(ReportEvent::ArtifactWritten {
        path: destination.to_path_buf(),
        sha256: checksum.clone(),
    });

    let artifact_path = paths.logical_path(destination);
    let entry = ManifestEntry::new(SETTINGS_ARTIFACT_NAME, &artifact_path, &checksum);
    record_artifact(manifest_path, &entry, now)?;
    reporter.report(ReportEvent::ManifestUpdated {
        path: manifest_path.to_path_buf(),
        artifact: artifact_path,
    });

    Ok(ExportResult {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        checksum,
        assets,
    })
}
