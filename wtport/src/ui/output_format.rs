// wtport/src/ui/output_format.rs
//! Themed status messages on stderr.

use std::io::{self, Write};

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// Writes `msg` on its own line, colored with the theme's `entry` style when
/// `enable_colors` is set.
pub fn print_message<W: Write>(
    writer: &mut W,
    msg: &str,
    theme: &ThemeMap,
    entry: ThemeEntry,
    enable_colors: bool,
) -> io::Result<()> {
    match color_for(theme, entry).filter(|_| enable_colors) {
        Some(color) => writeln!(writer, "{}", msg.color(color)),
        None => writeln!(writer, "{}", msg),
    }
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, msg, theme, ThemeEntry::Info, enable_colors)
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, msg, theme, ThemeEntry::Success, enable_colors)
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, &format!("WARN: {}", msg), theme, ThemeEntry::Warn, enable_colors)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, &format!("ERROR: {}", msg), theme, ThemeEntry::Error, enable_colors)
}

pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let colors = io::stderr().is_terminal();
    let _ = print_info_message(&mut io::stderr(), msg.as_ref(), theme, colors);
}

pub fn success_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let colors = io::stderr().is_terminal();
    let _ = print_success_message(&mut io::stderr(), msg.as_ref(), theme, colors);
}

pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let colors = io::stderr().is_terminal();
    let _ = print_warn_message(&mut io::stderr(), msg.as_ref(), theme, colors);
}

pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let colors = io::stderr().is_terminal();
    let _ = print_error_message(&mut io::stderr(), msg.as_ref(), theme, colors);
}
