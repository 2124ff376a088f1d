// wtport/src/ui/summary.rs
//! Tables for `scan`, `diagnostics` and `backups list`.
//!
//! Cell colors come from the console theme: headers use `header`, scan rows
//! use `summary_rule_name` and `summary_occurrences`, and diagnostic statuses
//! use `success`, `warn` and `error`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use owo_colors::AnsiColors;

use wtport_core::{AnalysisSummary, DiagnosticResult, DiagnosticStatus};

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// Maps a theme color onto the table renderer's palette.
fn table_color(color: AnsiColors) -> Color {
    match color {
        AnsiColors::Black => Color::Black,
        AnsiColors::Red => Color::DarkRed,
        AnsiColors::Green => Color::DarkGreen,
        AnsiColors::Yellow => Color::DarkYellow,
        AnsiColors::Blue => Color::DarkBlue,
        AnsiColors::Magenta => Color::DarkMagenta,
        AnsiColors::Cyan => Color::DarkCyan,
        AnsiColors::White => Color::Grey,
        AnsiColors::Default => Color::Reset,
        AnsiColors::BrightBlack => Color::DarkGrey,
        AnsiColors::BrightRed => Color::Red,
        AnsiColors::BrightGreen => Color::Green,
        AnsiColors::BrightYellow => Color::Yellow,
        AnsiColors::BrightBlue => Color::Blue,
        AnsiColors::BrightMagenta => Color::Magenta,
        AnsiColors::BrightCyan => Color::Cyan,
        AnsiColors::BrightWhite => Color::White,
    }
}

fn themed_cell(text: impl ToString, theme: &ThemeMap, entry: ThemeEntry, enable_colors: bool) -> Cell {
    let cell = Cell::new(text);
    match color_for(theme, entry).filter(|_| enable_colors) {
        Some(color) => cell.fg(table_color(color)),
        None => cell,
    }
}

fn new_table(header: &[&str], theme: &ThemeMap, enable_colors: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            header
                .iter()
                .map(|h| themed_cell(h, theme, ThemeEntry::Header, enable_colors))
                .collect::<Vec<_>>(),
        );
    // `enable_colors` already reflects the writer's terminal check.
    if enable_colors {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    table
}

/// Per-rule hit counts followed by denylisted aliases.
pub fn print_scan_summary<W: Write>(
    summary: &AnalysisSummary,
    writer: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    if summary.total_findings() == 0 {
        writeln!(writer, "No sensitive content found.")?;
        return Ok(());
    }

    let mut table = new_table(&["Rule", "Occurrences"], theme, enable_colors);
    for hit in &summary.rule_hits {
        table.add_row(vec![
            themed_cell(&hit.label, theme, ThemeEntry::SummaryRuleName, enable_colors),
            themed_cell(hit.occurrences, theme, ThemeEntry::SummaryOccurrences, enable_colors),
        ]);
    }
    for alias in &summary.denylisted_aliases {
        table.add_row(vec![
            themed_cell(format!("Denylisted alias: {}", alias), theme, ThemeEntry::SummaryRuleName, enable_colors),
            themed_cell(1, theme, ThemeEntry::SummaryOccurrences, enable_colors),
        ]);
    }
    writeln!(writer, "{}", table)?;
    writeln!(writer, "Total findings: {}", summary.total_findings())?;
    Ok(())
}

pub fn print_diagnostics<W: Write>(
    results: &[DiagnosticResult],
    writer: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    let mut table = new_table(&["Check", "Status", "Details"], theme, enable_colors);
    for result in results {
        let entry = match result.status {
            DiagnosticStatus::Ok => ThemeEntry::Success,
            DiagnosticStatus::Missing => ThemeEntry::Warn,
            DiagnosticStatus::Error => ThemeEntry::Error,
        };
        table.add_row(vec![
            Cell::new(&result.name),
            themed_cell(result.status, theme, entry, enable_colors),
            Cell::new(&result.details),
        ]);
    }
    writeln!(writer, "{}", table)?;
    Ok(())
}

pub fn print_backups<W: Write>(
    backups: &[PathBuf],
    writer: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    if backups.is_empty() {
        writeln!(writer, "No backup files available.")?;
        return Ok(());
    }
    let mut table = new_table(&["Index", "Backup"], theme, enable_colors);
    for (idx, backup) in backups.iter().enumerate() {
        let name = backup
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| backup.display().to_string());
        table.add_row(vec![Cell::new(idx + 1), Cell::new(name)]);
    }
    writeln!(writer, "{}", table)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::{ThemeColor, ThemeStyle};
    use wtport_core::RuleHit;

    fn sample_summary() -> AnalysisSummary {
        AnalysisSummary {
            rule_hits: vec![RuleHit { rule_name: "email".into(), label: "Scrub email addresses".into(), occurrences: 2 }],
            denylisted_aliases: vec!["hydra".into()],
        }
    }

    fn render_scan(theme: &ThemeMap, enable_colors: bool) -> String {
        let mut buf = Vec::new();
        print_scan_summary(&sample_summary(), &mut buf, theme, enable_colors).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn scan_summary_lists_rules_and_aliases() {
        let out = render_scan(&ThemeStyle::default_theme_map(), false);
        assert!(out.contains("Scrub email addresses"));
        assert!(out.contains("Denylisted alias: hydra"));
        assert!(out.contains("Total findings: 3"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn empty_scan_summary() {
        let mut buf = Vec::new();
        print_scan_summary(&AnalysisSummary::default(), &mut buf, &ThemeStyle::default_theme_map(), false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No sensitive content found.\n");
    }

    #[test]
    fn custom_theme_colors_scan_cells() {
        let defaults = ThemeStyle::default_theme_map();
        let mut custom = defaults.clone();
        custom.insert(
            ThemeEntry::SummaryRuleName,
            ThemeStyle { fg: Some(ThemeColor::Named("brightmagenta".into())) },
        );

        let default_out = render_scan(&defaults, true);
        let custom_out = render_scan(&custom, true);
        assert!(default_out.contains('\u{1b}'));
        assert_ne!(default_out, custom_out);
    }

    #[test]
    fn theme_entries_map_to_table_colors() {
        let mut theme = ThemeStyle::default_theme_map();
        theme.insert(ThemeEntry::Header, ThemeStyle { fg: Some(ThemeColor::Named("blue".into())) });
        let cell_color = color_for(&theme, ThemeEntry::Header).map(table_color);
        assert_eq!(cell_color, Some(Color::DarkBlue));
        assert_eq!(table_color(AnsiColors::BrightRed), Color::Red);
    }

    #[test]
    fn diagnostics_statuses_follow_theme() {
        let results = vec![DiagnosticResult {
            name: "Manifest".into(),
            status: DiagnosticStatus::Error,
            details: "missing".into(),
        }];
        let defaults = ThemeStyle::default_theme_map();
        let mut custom = defaults.clone();
        custom.insert(ThemeEntry::Error, ThemeStyle { fg: Some(ThemeColor::Named("cyan".into())) });

        let render = |theme: &ThemeMap| {
            let mut buf = Vec::new();
            print_diagnostics(&results, &mut buf, theme, true).unwrap();
            String::from_utf8(buf).unwrap()
        };
        assert_ne!(render(&defaults), render(&custom));
    }

    #[test]
    fn backups_are_numbered_from_one() {
        let mut buf = Vec::new();
        print_backups(
            &[PathBuf::from("/b/.zshrc.20240101-000000")],
            &mut buf,
            &ThemeStyle::default_theme_map(),
            false,
        )
        .unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains(".zshrc.20240101-000000"));
        assert!(out.contains("Index"));
    }
}
