// wtport-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use wtport_core::config::{self, RuleConfig};
use wtport_core::{sanitize_string, RegexEngine, SanitizationEngine};

#[test]
fn test_load_default_rules() {
    let config = RuleConfig::load_default_rules().unwrap();
    let names: Vec<&str> = config.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["home_path", "windows_user_path", "secret_tokens", "bearer_token", "email"]
    );
    assert_eq!(config.denylist_aliases, vec!["hashcat", "sqlmap", "hydra", "john", "rustscan"]);
    assert!(config.rules.iter().all(|r| !r.template));
}

#[test]
fn test_load_from_file_and_merge() -> Result<()> {
    let yaml_content = r#"
rules:
  - name: email
    pattern: '[a-z]+@corp\.internal'
    replace_with: 'someone@corp.example'
  - name: internal_host
    description: Internal host names
    pattern: '[a-z0-9-]+\.corp\.internal'
    replace_with: 'host.example'
denylist_aliases:
  - nmap
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let user = RuleConfig::load_from_file(file.path())?;
    let merged = config::merge_rules(RuleConfig::load_default_rules()?, Some(user));

    let names: Vec<&str> = merged.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["home_path", "windows_user_path", "secret_tokens", "bearer_token", "email", "internal_host"]
    );
    assert_eq!(merged.rules[4].replace_with, "someone@corp.example");
    assert!(merged.denylist_aliases.contains(&"nmap".to_string()));
    assert!(merged.denylist_aliases.contains(&"hashcat".to_string()));

    let out = sanitize_string(merged, "ssh bob@corp.internal\nalias nmap='nmap -sV'\n")?;
    assert_eq!(out, "ssh someone@corp.example\n");
    Ok(())
}

#[test]
fn test_load_from_file_rejects_invalid_pattern() -> Result<()> {
    let yaml_content = r#"
rules:
  - name: broken
    pattern: '([unclosed'
    replace_with: 'x'
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let err = RuleConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("broken"));
    Ok(())
}

#[test]
fn test_load_from_missing_file_fails_with_context() {
    let err = RuleConfig::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_disabled_rule_is_skipped() -> Result<()> {
    let mut config = RuleConfig::load_default_rules()?;
    config.set_active_rules(&[], &["email".to_string()]);
    let engine = RegexEngine::new(config)?;
    let out = engine.sanitize("contact: jane.doe@example.org\n", &mut wtport_core::NullReporter);
    assert_eq!(out, "contact: jane.doe@example.org\n");
    Ok(())
}
