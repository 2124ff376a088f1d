//! Configuration management for `wtport-core`.
//!
//! This module defines the data structures for sanitization rules and the alias
//! denylist. It handles deserialization of YAML rule files and provides
//! utilities for loading, merging, and validating them.
//!
//! Rule order is significant: rules are applied top to bottom, so merging keeps
//! the default ordering and only appends genuinely new rules.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// A single pattern -> replacement rule applied to raw profile text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct SanitizationRule {
    /// Unique identifier for the rule (e.g., "secret_tokens").
    pub name: String,
    /// Human-readable label, used in log output only.
    pub description: Option<String>,
    /// The regex pattern string, matched against the full text.
    pub pattern: String,
    /// The string to replace matches with.
    pub replace_with: String,
    /// If true, `$1` / `${name}` references in `replace_with` are expanded.
    /// Otherwise the replacement is inserted verbatim.
    pub template: bool,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
}

impl Default for SanitizationRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            pattern: String::new(),
            replace_with: "<redacted>".to_string(),
            template: false,
            enabled: None,
        }
    }
}

impl SanitizationRule {
    /// The label used when reporting hits for this rule.
    pub fn label(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.name)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }
}

/// Top-level rule configuration: the ordered rule table plus the alias denylist.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RuleConfig {
    pub rules: Vec<SanitizationRule>,
    pub denylist_aliases: Vec<String>,
}

impl RuleConfig {
    /// Loads rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: RuleConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_rules(&config.rules)?;
        info!("Loaded {} rules from file {}.", config.rules.len(), path.display());

        Ok(config)
    }

    /// Loads the built-in rule table from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: RuleConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default rules")?;

        debug!("Loaded {} default rules.", config.rules.len());
        Ok(config)
    }

    /// Toggles rules by name from the `--enable` / `--disable` CLI lists.
    /// A name present in both lists ends up disabled.
    pub fn set_active_rules(&mut self, enable_rules: &[String], disable_rules: &[String]) {
        let enable_set: HashSet<&str> = enable_rules.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();

        let all_rule_names: HashSet<&str> = self.rules.iter().map(|r| r.name.as_str()).collect();

        for rule_name in enable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `enable_rules` list does not exist.", rule_name);
        }
        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `disable_rules` list does not exist.", rule_name);
        }

        for rule in self.rules.iter_mut() {
            if disable_set.contains(rule.name.as_str()) {
                rule.enabled = Some(false);
            } else if enable_set.contains(rule.name.as_str()) {
                rule.enabled = Some(true);
            }
        }

        debug!(
            "Active rules after filtering: {}",
            self.rules.iter().filter(|r| r.is_enabled()).count()
        );
    }
}

/// Merges a user-supplied configuration on top of the defaults.
///
/// A user rule whose name matches a default replaces it at the same position;
/// new names are appended in the order the user listed them. Denylist names
/// are unioned, keeping first-seen order.
pub fn merge_rules(default_config: RuleConfig, user_config: Option<RuleConfig>) -> RuleConfig {
    debug!("merge_rules called. Initial default rules count: {}", default_config.rules.len());

    let Some(user_cfg) = user_config else {
        return default_config;
    };

    let mut final_rules = default_config.rules;
    for user_rule in user_cfg.rules {
        match final_rules.iter_mut().find(|r| r.name == user_rule.name) {
            Some(existing) => {
                debug!("User rule '{}' overrides the default rule.", user_rule.name);
                *existing = user_rule;
            }
            None => final_rules.push(user_rule),
        }
    }

    let mut denylist = default_config.denylist_aliases;
    for name in user_cfg.denylist_aliases {
        if !denylist.contains(&name) {
            denylist.push(name);
        }
    }

    debug!("Final total rules after merge: {}", final_rules.len());
    RuleConfig { rules: final_rules, denylist_aliases: denylist }
}

/// Validates rule integrity (names, regex compilation, capture groups).
pub fn validate_rules(rules: &[SanitizationRule]) -> Result<()> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();
    let capture_group_regex = Regex::new(r"\$\{?(\d+)\}?").context("capture reference regex")?;

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.as_str()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        if rule.pattern.is_empty() {
            errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
            continue;
        }

        if rule.pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                rule.name,
                rule.pattern.len(),
                MAX_PATTERN_LENGTH
            ));
            continue;
        }

        let regex = match Regex::new(&rule.pattern) {
            Ok(r) => r,
            Err(e) => {
                errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
                continue;
            }
        };

        if rule.template {
            // captures_len() includes the implicit group 0.
            let group_count = regex.captures_len() - 1;
            for cap in capture_group_regex.captures_iter(&rule.replace_with) {
                if let Some(Ok(group_num)) = cap.get(1).map(|m| m.as_str().parse::<usize>()) {
                    if group_num > group_count {
                        errors.push(format!(
                            "Rule '{}': replacement references non-existent capture group '${}'.",
                            rule.name, group_num
                        ));
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Rule validation failed:\n{}", errors.join("\n")))
    }
}
