// wtport-core/src/engines/regex_engine.rs
//! A `SanitizationEngine` implementation that uses regular expressions
//! to normalize paths and redact secrets, followed by the alias denylist.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::debug;
use regex::Captures;

use crate::config::RuleConfig;
use crate::denylist::{find_denylisted_aliases, strip_denylisted_aliases, DenylistSet};
use crate::engine::{AnalysisSummary, RuleHit, SanitizationEngine};
use crate::report::{ReportEvent, Reporter};
use crate::sanitizers::compiler::{compile_rules, CompiledRule, CompiledRules};

#[derive(Debug, Clone)]
pub struct RegexEngine {
    compiled_rules: CompiledRules,
    denylist: DenylistSet,
    config: RuleConfig,
}

impl RegexEngine {
    pub fn new(config: RuleConfig) -> Result<Self> {
        let compiled_rules = compile_rules(&config.rules)
            .context("Failed to compile sanitization rules for RegexEngine")?;
        let denylist = DenylistSet::new(config.denylist_aliases.iter().cloned());

        Ok(Self { compiled_rules, denylist, config })
    }

    /// Builds an engine from the embedded default rule table.
    pub fn with_default_rules() -> Result<Self> {
        Self::new(RuleConfig::load_default_rules()?)
    }

    pub fn denylist(&self) -> &DenylistSet {
        &self.denylist
    }

    /// Replaces every non-overlapping match of one rule, returning the rewritten
    /// text and the number of substitutions. A match whose replacement equals
    /// the matched text is not counted, so already-sanitized input reports zero.
    fn apply_rule(rule: &CompiledRule, content: &str) -> (String, usize) {
        let mut count = 0usize;
        let replaced = rule.regex.replace_all(content, |caps: &Captures| {
            let replacement = if rule.template {
                let mut dst = String::new();
                caps.expand(&rule.replace_with, &mut dst);
                dst
            } else {
                rule.replace_with.clone()
            };
            if replacement != caps[0] {
                count += 1;
            }
            replacement
        });
        (replaced.into_owned(), count)
    }
}

impl SanitizationEngine for RegexEngine {
    fn apply_rules(&self, content: &str, reporter: &mut dyn Reporter) -> String {
        let mut scrubbed = content.to_string();
        for rule in &self.compiled_rules.rules {
            let (next, count) = Self::apply_rule(rule, &scrubbed);
            if count > 0 {
                debug!("Rule '{}' matched {} time(s)", rule.name, count);
                reporter.report(ReportEvent::RuleApplied { rule: rule.label.clone(), count });
                scrubbed = next;
            }
        }
        scrubbed
    }

    fn sanitize(&self, content: &str, reporter: &mut dyn Reporter) -> String {
        let scrubbed = self.apply_rules(content, reporter);
        strip_denylisted_aliases(&scrubbed, &self.denylist, reporter)
    }

    fn analyze(&self, content: &str) -> AnalysisSummary {
        // Rules are evaluated against progressively rewritten text, exactly as
        // `apply_rules` would see it.
        let mut scrubbed = content.to_string();
        let mut rule_hits = Vec::new();
        for rule in &self.compiled_rules.rules {
            let (next, count) = Self::apply_rule(rule, &scrubbed);
            if count > 0 {
                rule_hits.push(RuleHit {
                    rule_name: rule.name.clone(),
                    label: rule.label.clone(),
                    occurrences: count,
                });
                scrubbed = next;
            }
        }
        let denylisted_aliases = find_denylisted_aliases(&scrubbed, &self.denylist)
            .into_iter()
            .map(str::to_string)
            .collect();

        AnalysisSummary { rule_hits, denylisted_aliases }
    }

    fn compiled_rules(&self) -> &CompiledRules {
        &self.compiled_rules
    }

    fn get_rules(&self) -> &RuleConfig {
        &self.config
    }
}
