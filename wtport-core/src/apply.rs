// wtport-core/src/apply.rs
//! Applying the portable profile to the local machine.
//!
//! Three modes:
//! * `Default`: back up, then overwrite the terminal settings and `~/.zshrc`.
//! * `Copy`: inject the portable profile next to the existing setup.
//! * `Promote`: make the previously copied profile the default.
//!
//! The settings target is backed up before any change. `~/.zshrc` is backed
//! up before default and promote overwrite it.
//! A dry run touches nothing and only reports what would happen.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use log::info;

use crate::errors::{PortableError, Result};
use crate::paths::{ensure_parent, ArtifactPaths};
use crate::report::{ReportEvent, Reporter};
use crate::settings::{ensure_portable_profile, load_settings, write_settings};

pub const PORTABLE_ZSHRC_COPY: &str = ".zshrc-wtport-portable";
pub const LOADER_LINE: &str = "[[ -f ~/.zshrc-wtport-portable ]] && source ~/.zshrc-wtport-portable\n";
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplyMode {
    Default,
    Copy,
    Promote,
}

impl fmt::Display for ApplyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ApplyMode::Default => "default",
            ApplyMode::Copy => "copy",
            ApplyMode::Promote => "promote",
        })
    }
}

impl FromStr for ApplyMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(ApplyMode::Default),
            "copy" => Ok(ApplyMode::Copy),
            "promote" => Ok(ApplyMode::Promote),
            other => Err(format!("unknown apply mode '{}'", other)),
        }
    }
}

/// Source artifacts and local targets for an apply run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyPlan {
    pub portable_settings: PathBuf,
    pub portable_profile: PathBuf,
    pub settings_target: PathBuf,
    pub zshrc_target: PathBuf,
    pub backup_dir: PathBuf,
}

impl ApplyPlan {
    pub fn new(paths: &ArtifactPaths, settings_target: PathBuf, home: &Path) -> Self {
        Self {
            portable_settings: paths.portable_settings(),
            portable_profile: paths.portable_profile(),
            settings_target,
            zshrc_target: home.join(".zshrc"),
            backup_dir: default_backup_dir(home),
        }
    }
}

/// `~/wtport/backups`.
pub fn default_backup_dir(home: &Path) -> PathBuf {
    home.join("wtport").join("backups")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub settings_path: PathBuf,
    pub zsh_path: PathBuf,
    pub backups: Vec<PathBuf>,
}

/// Copies `source` to `<backup_dir>/<file name>.<timestamp>`.
pub fn backup_file(
    source: &Path,
    backup_dir: &Path,
    now: DateTime<Utc>,
    reporter: &mut dyn Reporter,
) -> Result<PathBuf> {
    fs::create_dir_all(backup_dir)?;
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "backup".to_string());
    let destination = backup_dir.join(format!("{}.{}", name, now.format(BACKUP_TIMESTAMP_FORMAT)));
    fs::copy(source, &destination)?;
    reporter.report(ReportEvent::BackupCreated {
        source: source.to_path_buf(),
        backup: destination.clone(),
    });
    Ok(destination)
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    ensure_parent(to)?;
    fs::copy(from, to)?;
    Ok(())
}

fn apply_settings(
    plan: &ApplyPlan,
    mode: ApplyMode,
    dry_run: bool,
    now: DateTime<Utc>,
    reporter: &mut dyn Reporter,
    backups: &mut Vec<PathBuf>,
) -> Result<()> {
    if !plan.portable_settings.exists() {
        return Err(PortableError::not_found(
            &plan.portable_settings,
            "Portable settings (run export first)",
        ));
    }
    let target = &plan.settings_target;
    if target.exists() && !dry_run {
        backups.push(backup_file(target, &plan.backup_dir, now, reporter)?);
    }

    if mode == ApplyMode::Default {
        if dry_run {
            reporter.report(ReportEvent::Notice(format!(
                "Would overwrite {} with portable settings",
                target.display()
            )));
        } else {
            copy_file(&plan.portable_settings, target)?;
        }
        return Ok(());
    }

    let updated = match mode {
        ApplyMode::Copy => {
            let base = if target.exists() { target } else { &plan.portable_settings };
            ensure_portable_profile(load_settings(base)?, false, base)?
        }
        _ => ensure_portable_profile(load_settings(&plan.portable_settings)?, true, &plan.portable_settings)?,
    };

    if dry_run {
        reporter.report(ReportEvent::Notice(format!("Would update profiles list in {}", target.display())));
    } else {
        write_settings(target, &updated)?;
    }
    Ok(())
}

fn apply_zsh(
    plan: &ApplyPlan,
    mode: ApplyMode,
    dry_run: bool,
    now: DateTime<Utc>,
    reporter: &mut dyn Reporter,
    backups: &mut Vec<PathBuf>,
) -> Result<()> {
    if !plan.portable_profile.exists() {
        return Err(PortableError::not_found(
            &plan.portable_profile,
            "Portable profile (run sanitize first)",
        ));
    }
    let target = &plan.zshrc_target;

    match mode {
        ApplyMode::Default | ApplyMode::Promote => {
            if target.exists() && !dry_run {
                backups.push(backup_file(target, &plan.backup_dir, now, reporter)?);
            }
            if dry_run {
                let verb = if mode == ApplyMode::Default { "overwrite" } else { "promote portable profile at" };
                reporter.report(ReportEvent::Notice(format!("Would {} {}", verb, target.display())));
            } else {
                copy_file(&plan.portable_profile, target)?;
            }
        }
        ApplyMode::Copy => {
            let portable_copy = target.with_file_name(PORTABLE_ZSHRC_COPY);
            if dry_run {
                reporter.report(ReportEvent::Notice(format!(
                    "Would create copy at {}",
                    portable_copy.display()
                )));
                return Ok(());
            }
            copy_file(&plan.portable_profile, &portable_copy)?;
            if target.exists() {
                let current = fs::read_to_string(target)?;
                if !current.contains(LOADER_LINE) {
                    fs::write(target, format!("{}\n{}", current, LOADER_LINE))?;
                }
            } else {
                ensure_parent(target)?;
                fs::write(target, LOADER_LINE)?;
            }
        }
    }
    Ok(())
}

/// Applies settings first, then the shell profile.
pub fn apply_profile(
    plan: &ApplyPlan,
    mode: ApplyMode,
    dry_run: bool,
    now: DateTime<Utc>,
    reporter: &mut dyn Reporter,
) -> Result<ApplyResult> {
    info!("Applying portable profile (mode={}, dry_run={})", mode, dry_run);
    let mut backups = Vec::new();
    apply_settings(plan, mode, dry_run, now, reporter, &mut backups)?;
    apply_zsh(plan, mode, dry_run, now, reporter, &mut backups)?;
    Ok(ApplyResult {
        settings_path: plan.settings_target.clone(),
        zsh_path: plan.zshrc_target.clone(),
        backups,
    })
}

/// Backup files in `dir`, sorted by name. Missing directory yields none.
pub fn list_backups(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    backups.sort();
    Ok(backups)
}

/// Infers where a backup belongs from its file name.
pub fn restore_target(backup: &Path, plan: &ApplyPlan) -> Option<PathBuf> {
    let name = backup.file_name()?.to_string_lossy();
    if name.starts_with("settings.json") {
        Some(plan.settings_target.clone())
    } else if name.starts_with(".zshrc") {
        Some(plan.zshrc_target.clone())
    } else {
        None
    }
}

/// Copies a backup over its inferred target. Returns the restored path.
pub fn restore_backup(backup: &Path, plan: &ApplyPlan, reporter: &mut dyn Reporter) -> Result<PathBuf> {
    let target = restore_target(backup, plan).ok_or_else(|| {
        PortableError::data(backup, "cannot infer restore target from backup name")
    })?;
    copy_file(backup, &target)?;
    reporter.report(ReportEvent::Notice(format!(
        "Restored {} -> {}",
        backup.display(),
        target.display()
    )));
    Ok(target)
}
