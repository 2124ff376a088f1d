// wtport-core/src/engine.rs
//! Defines the core SanitizationEngine trait and related data structures.
//!
//! The `SanitizationEngine` trait decouples the pipeline and the CLI from the
//! concrete rule implementation. Engines are infallible at apply time: all
//! validation happens when they are constructed.
//!
//! License: MIT OR APACHE 2.0

use serde::Serialize;

use crate::config::RuleConfig;
use crate::report::Reporter;
use crate::sanitizers::compiler::CompiledRules;

/// A per-rule hit count, produced by `analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleHit {
    pub rule_name: String,
    pub label: String,
    pub occurrences: usize,
}

/// Result of a dry analysis: what sanitization would change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    pub rule_hits: Vec<RuleHit>,
    pub denylisted_aliases: Vec<String>,
}

impl AnalysisSummary {
    pub fn total_findings(&self) -> usize {
        self.rule_hits.iter().map(|h| h.occurrences).sum::<usize>() + self.denylisted_aliases.len()
    }
}

/// A pluggable text sanitizer.
pub trait SanitizationEngine {
    /// Applies the substitution rules only, in table order.
    fn apply_rules(&self, content: &str, reporter: &mut dyn Reporter) -> String;

    /// Runs the full transform: rules first, then the alias denylist.
    /// The result always ends with exactly one trailing newline.
    fn sanitize(&self, content: &str, reporter: &mut dyn Reporter) -> String;

    /// Reports what `sanitize` would change without rewriting the content.
    fn analyze(&self, content: &str) -> AnalysisSummary;

    /// The compiled, enabled rules in application order.
    fn compiled_rules(&self) -> &CompiledRules;

    /// The configuration this engine was built from.
    fn get_rules(&self) -> &RuleConfig;
}
