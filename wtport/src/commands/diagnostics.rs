// wtport/src/commands/diagnostics.rs
//! `wtport diagnostics`.

use std::io;

use anyhow::Result;
use is_terminal::IsTerminal;

use crate::commands::AppContext;
use crate::ui::summary;

pub fn run_diagnostics(ctx: &AppContext) -> Result<()> {
    let results = wtport_core::run_diagnostics(&ctx.paths);
    let stdout = io::stdout();
    let colors = stdout.is_terminal();
    summary::print_diagnostics(&results, &mut stdout.lock(), ctx.theme, colors)
}
