//! compiler.rs - Compiles sanitization rules into ready-to-apply regexes.
//!
//! Compilation happens once per run. Every failure is collected and reported
//! together so an operator fixing a custom rule file sees all problems at once.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::{SanitizationRule, MAX_PATTERN_LENGTH};
use crate::errors::PortableError;

/// Represents a single compiled sanitization rule.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The string to replace matches of this rule's pattern with.
    pub replace_with: String,
    /// Whether `replace_with` expands capture references.
    pub template: bool,
    /// The unique name of the rule.
    pub name: String,
    /// Label used when reporting hits.
    pub label: String,
}

/// The ordered collection of compiled rules.
#[derive(Debug, Clone, Default)]
pub struct CompiledRules {
    pub rules: Vec<CompiledRule>,
}

/// Compiles the enabled rules, preserving their order.
pub fn compile_rules(rules_to_compile: &[SanitizationRule]) -> Result<CompiledRules, PortableError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::new();
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile.iter().filter(|r| r.is_enabled()) {
        if rule.pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(PortableError::PatternLengthExceeded(
                rule.name.clone(),
                rule.pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let regex_result = RegexBuilder::new(&rule.pattern)
            .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
            .build();

        match regex_result {
            Ok(regex) => {
                log::debug!(
                    target: "wtport_core::sanitizer",
                    "Rule '{}' compiled successfully.",
                    &rule.name
                );
                compiled_rules.push(CompiledRule {
                    regex,
                    replace_with: rule.replace_with.clone(),
                    template: rule.template,
                    name: rule.name.clone(),
                    label: rule.label().to_string(),
                });
            }
            Err(e) => {
                compilation_errors.push(PortableError::RuleCompilationError(rule.name.clone(), e));
            }
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(PortableError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    debug!("Finished compiling rules. Total compiled: {}.", compiled_rules.len());
    Ok(CompiledRules { rules: compiled_rules })
}
