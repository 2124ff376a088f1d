// wtport/src/commands/sanitize.rs
//! `wtport sanitize`: scrub a shell profile into the artifact repository.

use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::Utc;
use is_terminal::IsTerminal;
use log::info;

use wtport_core::{sanitize_profile, SanitizeRequest};

use crate::cli::SanitizeCommand;
use crate::commands::{build_engine, resolve_source, AppContext};
use crate::reporter::ConsoleReporter;
use crate::ui::diff_viewer;
use crate::ui::output_format::success_msg;

pub fn run_sanitize(cmd: SanitizeCommand, ctx: &AppContext) -> Result<()> {
    let engine = build_engine(ctx.config_path.as_deref(), &cmd.rules)?;

    let source = resolve_source(cmd.source)?;
    let mut request = SanitizeRequest::new(source, &ctx.paths);
    if let Some(output) = cmd.output {
        request = request.with_destination(output, &ctx.paths);
    }
    if let Some(manifest) = cmd.manifest {
        request.manifest_path = manifest;
    }
    if let Some(log) = cmd.log {
        request.log_path = log;
    }
    info!("Sanitize request: {:?}", request);

    let mut reporter = ConsoleReporter::new(ctx.theme, ctx.quiet);
    let outcome = sanitize_profile(&request, &engine, &mut reporter, Utc::now())
        .with_context(|| format!("Failed to sanitize {}", request.source.display()))?;

    if cmd.diff {
        let stdout = io::stdout();
        let colors = stdout.is_terminal();
        let mut writer = stdout.lock();
        diff_viewer::print_diff(&outcome.original, &outcome.sanitized, &mut writer, ctx.theme, colors)?;
        writer.flush()?;
    }

    if !ctx.quiet {
        success_msg(
            format!("Sanitized profile written to {}", outcome.destination.display()),
            ctx.theme,
        );
    }
    Ok(())
}
