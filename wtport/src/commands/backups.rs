// wtport/src/commands/backups.rs
//! `wtport backups list|restore`.

use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use is_terminal::IsTerminal;
use log::debug;

use wtport_core::{list_backups, restore_backup, ApplyPlan};

use crate::cli::TargetArgs;
use crate::commands::{resolve_backup_dir, resolve_home, resolve_settings_target, AppContext};
use crate::reporter::ConsoleReporter;
use crate::ui::output_format::success_msg;
use crate::ui::summary;

pub fn run_list(targets: &TargetArgs, ctx: &AppContext) -> Result<()> {
    let dir = resolve_backup_dir(targets)?;
    debug!("Listing backups in {}", dir.display());
    let backups = list_backups(&dir)?;
    let stdout = io::stdout();
    let colors = stdout.is_terminal();
    summary::print_backups(&backups, &mut stdout.lock(), ctx.theme, colors)
}

pub fn run_restore(index: usize, targets: &TargetArgs, ctx: &AppContext) -> Result<()> {
    let dir = resolve_backup_dir(targets)?;
    let backups = list_backups(&dir)?;
    let selected = index
        .checked_sub(1)
        .and_then(|i| backups.get(i))
        .ok_or_else(|| anyhow!("No backup with index {} ({} available)", index, backups.len()))?;

    let is_settings = selected
        .file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with("settings.json"));
    // The settings target is only located when a settings backup is restored.
    let settings_target = if is_settings { resolve_settings_target(targets)? } else { PathBuf::new() };

    let mut plan = ApplyPlan::new(&ctx.paths, settings_target, &resolve_home(targets)?);
    plan.backup_dir = dir;

    let mut reporter = ConsoleReporter::new(ctx.theme, ctx.quiet);
    let restored = restore_backup(selected, &plan, &mut reporter)?;
    if !ctx.quiet {
        success_msg(format!("Restored {}", restored.display()), ctx.theme);
    }
    Ok(())
}
