// wtport/src/ui/diff_viewer.rs
//! Unified diff between the original and the sanitized profile.

use std::io::Write;

use anyhow::Result;
use diffy::{create_patch, Line as DiffLine};
use owo_colors::OwoColorize;

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

fn write_line<W: Write>(
    writer: &mut W,
    prefix: char,
    text: &str,
    entry: Option<ThemeEntry>,
    theme: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    let line = format!("{}{}", prefix, text.trim_end_matches('\n'));
    match entry.and_then(|e| color_for(theme, e)).filter(|_| enable_colors) {
        Some(color) => writeln!(writer, "{}", line.color(color))?,
        None => writeln!(writer, "{}", line)?,
    }
    Ok(())
}

/// Prints removed lines with `-`, added lines with `+` and context with a space.
pub fn print_diff<W: Write>(
    original: &str,
    sanitized: &str,
    writer: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    let patch = create_patch(original, sanitized);
    let header = "--- Diff View ---";
    match color_for(theme, ThemeEntry::DiffHeader).filter(|_| enable_colors) {
        Some(color) => writeln!(writer, "{}", header.color(color))?,
        None => writeln!(writer, "{}", header)?,
    }

    if patch.hunks().is_empty() {
        writeln!(writer, "No changes detected.")?;
        return Ok(());
    }

    for hunk in patch.hunks() {
        for line in hunk.lines() {
            match line {
                DiffLine::Delete(s) => write_line(writer, '-', s, Some(ThemeEntry::DiffRemoved), theme, enable_colors)?,
                DiffLine::Insert(s) => write_line(writer, '+', s, Some(ThemeEntry::DiffAdded), theme, enable_colors)?,
                DiffLine::Context(s) => write_line(writer, ' ', s, None, theme, enable_colors)?,
            }
        }
    }
    Ok(())
}
