//! Alias denylist filtering for shell profiles.
//!
//! Some aliases advertise tooling an operator would rather not publish. Those
//! lines are dropped whole; everything else passes through untouched and in
//! order.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;

use log::debug;

use crate::report::{ReportEvent, Reporter};

const ALIAS_PREFIX: &str = "alias ";

/// Case-sensitive, exact-match set of alias names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DenylistSet {
    names: HashSet<String>,
}

impl DenylistSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { names: names.into_iter().map(Into::into).collect() }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Extracts the alias name from an `alias name=value` line.
///
/// Returns `None` for lines that do not start with `alias `. A line with no `=`
/// yields its whole (trimmed) remainder.
pub fn alias_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(ALIAS_PREFIX)?;
    let name = match rest.split_once('=') {
        Some((name, _)) => name,
        None => rest,
    };
    Some(name.trim())
}

/// Drops every `alias` line whose name is in `denylist`.
///
/// Output lines are joined with `\n` and always end with exactly one trailing
/// newline.
pub fn strip_denylisted_aliases(
    content: &str,
    denylist: &DenylistSet,
    reporter: &mut dyn Reporter,
) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for line in content.lines() {
        if let Some(name) = alias_name(line) {
            if denylist.contains(name) {
                debug!("Dropping denylisted alias line for '{}'", name);
                reporter.report(ReportEvent::AliasRemoved { name: name.to_string() });
                continue;
            }
        }
        kept.push(line);
    }

    let mut out = kept.join("\n");
    out.push('\n');
    out
}

/// Counts denylisted alias lines without rewriting anything.
pub fn find_denylisted_aliases<'a>(content: &'a str, denylist: &DenylistSet) -> Vec<&'a str> {
    content
        .lines()
        .filter_map(alias_name)
        .filter(|name| denylist.contains(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{NullReporter, RecordingReporter};

    fn default_denylist() -> DenylistSet {
        DenylistSet::new(["hashcat", "sqlmap", "hydra", "john", "rustscan"])
    }

    #[test]
    fn removes_denylisted_and_keeps_others() {
        let out = strip_denylisted_aliases(
            "alias hashcat='hashcat --hz'\nalias py='python3'\n",
            &default_denylist(),
            &mut NullReporter,
        );
        assert_eq!(out, "alias py='python3'\n");
    }

    #[test]
    fn unquoted_value_is_still_removed() {
        let out = strip_denylisted_aliases("alias rustscan=rustscan\n", &default_denylist(), &mut NullReporter);
        assert_eq!(out, "\n");
    }

    #[test]
    fn trailing_comment_goes_with_the_line() {
        let out = strip_denylisted_aliases(
            "export A=1\nalias john='john --wordlist' # cracking\necho done",
            &default_denylist(),
            &mut NullReporter,
        );
        assert_eq!(out, "export A=1\necho done\n");
    }

    #[test]
    fn malformed_alias_without_equals_does_not_panic() {
        let mut reporter = RecordingReporter::new();
        let out = strip_denylisted_aliases("alias hydra\nalias\nalias  \n", &default_denylist(), &mut reporter);
        assert_eq!(out, "alias\nalias  \n");
        assert_eq!(reporter.aliases_removed(), ["hydra"]);
    }

    #[test]
    fn matching_is_case_sensitive_and_exact() {
        let out = strip_denylisted_aliases(
            "alias Hydra=x\nalias hydra2=x\nalias hydra =x\n",
            &default_denylist(),
            &mut NullReporter,
        );
        assert_eq!(out, "alias Hydra=x\nalias hydra2=x\n");
    }

    #[test]
    fn only_lines_starting_with_alias_are_considered() {
        let out = strip_denylisted_aliases("  alias john=x\n#alias john=x\n", &default_denylist(), &mut NullReporter);
        assert_eq!(out, "  alias john=x\n#alias john=x\n");
    }

    #[test]
    fn alias_name_extraction() {
        assert_eq!(alias_name("alias ll='ls -l'"), Some("ll"));
        assert_eq!(alias_name("alias  gs = 'git status'"), Some("gs"));
        assert_eq!(alias_name("alias orphan"), Some("orphan"));
        assert_eq!(alias_name("export X=1"), None);
    }

    #[test]
    fn find_reports_without_rewriting() {
        let found = find_denylisted_aliases("alias john=x\nalias py=y\nalias sqlmap=z\n", &default_denylist());
        assert_eq!(found, ["john", "sqlmap"]);
    }
}
