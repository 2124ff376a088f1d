// wtport/src/commands/scan.rs
//! `wtport scan`: report what sanitization would change. Writes nothing.

use std::fs;
use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;

use wtport_core::{PortableError, SanitizationEngine};

use crate::cli::ScanCommand;
use crate::commands::{build_engine, resolve_source, AppContext};
use crate::ui::summary;

pub fn run_scan(cmd: ScanCommand, ctx: &AppContext) -> Result<()> {
    let engine = build_engine(ctx.config_path.as_deref(), &cmd.rules)?;

    let source = resolve_source(cmd.source)?;
    if !source.is_file() {
        return Err(PortableError::not_found(&source, "Shell profile").into());
    }
    let content = fs::read_to_string(&source)
        .with_context(|| format!("Failed to read {}", source.display()))?;
    let analysis = engine.analyze(&content);

    let stdout = io::stdout();
    let colors = stdout.is_terminal();
    let mut writer = stdout.lock();
    if cmd.json {
        serde_json::to_writer_pretty(&mut writer, &analysis)?;
        writeln!(writer)?;
    } else {
        summary::print_scan_summary(&analysis, &mut writer, ctx.theme, colors)?;
    }
    writer.flush()?;

    if let Some(threshold) = cmd.fail_over_threshold {
        let total = analysis.total_findings();
        if total > threshold {
            bail!("{} findings exceed the threshold of {}", total, threshold);
        }
    }
    Ok(())
}
