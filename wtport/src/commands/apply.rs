// wtport/src/commands/apply.rs
//! `wtport apply`: install the portable artifacts on this machine.

use anyhow::{Context, Result};
use chrono::Utc;

use wtport_core::{apply_profile, ApplyMode, ApplyPlan};

use crate::cli::{ApplyCommand, TargetArgs};
use crate::commands::{resolve_backup_dir, resolve_home, resolve_settings_target, AppContext};
use crate::reporter::ConsoleReporter;
use crate::ui::output_format::{info_msg, success_msg};

/// Resolves every local target the apply and restore paths need.
pub fn build_plan(targets: &TargetArgs, ctx: &AppContext) -> Result<ApplyPlan> {
    let home = resolve_home(targets)?;
    let mut plan = ApplyPlan::new(&ctx.paths, resolve_settings_target(targets)?, &home);
    plan.backup_dir = resolve_backup_dir(targets)?;
    Ok(plan)
}

pub fn run_apply(cmd: ApplyCommand, ctx: &AppContext) -> Result<()> {
    let plan = build_plan(&cmd.targets, ctx)?;
    let mode = ApplyMode::from(cmd.mode);

    let mut reporter = ConsoleReporter::new(ctx.theme, ctx.quiet);
    let result = apply_profile(&plan, mode, cmd.dry_run, Utc::now(), &mut reporter)
        .with_context(|| format!("Failed to apply portable profile in {} mode", mode))?;

    if ctx.quiet {
        return Ok(());
    }
    if cmd.dry_run {
        info_msg("Dry run complete; no files were changed.", ctx.theme);
    } else {
        success_msg(
            format!(
                "Applied {} mode: settings -> {}, zsh -> {}",
                mode,
                result.settings_path.display(),
                result.zsh_path.display()
            ),
            ctx.theme,
        );
    }
    Ok(())
}
