// wtport/src/commands/export.rs
//! `wtport export`: normalize the live Windows Terminal settings into
//! `artifacts/settings.json`.

use anyhow::{Context, Result};
use chrono::Utc;

use wtport_core::{export_settings, resolve_settings_path};

use crate::cli::ExportCommand;
use crate::commands::AppContext;
use crate::reporter::ConsoleReporter;
use crate::ui::output_format::success_msg;

pub fn run_export(cmd: ExportCommand, ctx: &AppContext) -> Result<()> {
    let source = match cmd.settings {
        Some(path) => path,
        None => resolve_settings_path(cmd.local_app_data.as_deref())?,
    };
    let destination = cmd.output.unwrap_or_else(|| ctx.paths.portable_settings());
    let manifest = cmd.manifest.unwrap_or_else(|| ctx.paths.manifest());

    let mut reporter = ConsoleReporter::new(ctx.theme, ctx.quiet);
    let result = export_settings(&source, &destination, &ctx.paths, &manifest, &mut reporter, Utc::now())
        .with_context(|| format!("Failed to export {}", source.display()))?;

    if !ctx.quiet {
        success_msg(
            format!("Exported settings to {} (sha256={})", result.destination.display(), result.checksum),
            ctx.theme,
        );
    }
    Ok(())
}
