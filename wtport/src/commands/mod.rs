// wtport/src/commands/mod.rs
//! Subcommand implementations and the shared run context.

pub mod apply;
pub mod backups;
pub mod diagnostics;
pub mod export;
pub mod sanitize;
pub mod scan;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;

use wtport_core::{
    merge_rules, resolve_settings_path, validate_rules, ArtifactPaths, RegexEngine, RuleConfig, SanitizationEngine,
};

use crate::cli::{BackupsCommand, Cli, Commands, RuleSelection, TargetArgs};
use crate::ui::theme::ThemeMap;

/// State shared by every subcommand.
pub struct AppContext<'a> {
    pub theme: &'a ThemeMap,
    pub quiet: bool,
    pub config_path: Option<PathBuf>,
    pub paths: ArtifactPaths,
}

/// Dispatches the parsed command line.
pub fn run(cli: Cli, theme: &ThemeMap) -> Result<()> {
    let ctx = AppContext {
        theme,
        quiet: cli.quiet,
        config_path: cli.config,
        paths: ArtifactPaths::new(cli.artifacts_dir),
    };
    debug!("Artifact root: {}", ctx.paths.root().display());

    match cli.command {
        Commands::Sanitize(cmd) => sanitize::run_sanitize(cmd, &ctx),
        Commands::Scan(cmd) => scan::run_scan(cmd, &ctx),
        Commands::Export(cmd) => export::run_export(cmd, &ctx),
        Commands::Apply(cmd) => apply::run_apply(cmd, &ctx),
        Commands::Backups(BackupsCommand::List { targets }) => backups::run_list(&targets, &ctx),
        Commands::Backups(BackupsCommand::Restore { index, targets }) => {
            backups::run_restore(index, &targets, &ctx)
        }
        Commands::Diagnostics => diagnostics::run_diagnostics(&ctx),
    }
}

/// Built-in rules, merged with `config_path` if given, then filtered.
pub fn load_rule_config(config_path: Option<&Path>, selection: &RuleSelection) -> Result<RuleConfig> {
    let defaults = RuleConfig::load_default_rules()?;
    let user = config_path.map(RuleConfig::load_from_file).transpose()?;
    let mut config = merge_rules(defaults, user);
    validate_rules(&config.rules).context("Merged rule configuration is invalid")?;
    config.set_active_rules(&selection.enable, &selection.disable);
    Ok(config)
}

/// Loads the rule configuration and compiles it into an engine.
pub fn build_engine(config_path: Option<&Path>, selection: &RuleSelection) -> Result<RegexEngine> {
    let engine = RegexEngine::new(load_rule_config(config_path, selection)?)?;
    debug!(
        "Engine ready: {} of {} rules active, {} denylisted aliases",
        engine.compiled_rules().rules.len(),
        engine.get_rules().rules.len(),
        engine.denylist().len()
    );
    Ok(engine)
}

/// `--source`, or `~/.zshrc`.
pub fn resolve_source(source: Option<PathBuf>) -> Result<PathBuf> {
    match source {
        Some(path) => Ok(path),
        None => wtport_core::pipeline::default_source_profile()
            .context("Could not determine the home directory; pass --source"),
    }
}

pub fn resolve_home(targets: &TargetArgs) -> Result<PathBuf> {
    match &targets.home {
        Some(home) => Ok(home.clone()),
        None => dirs::home_dir().context("Could not determine the home directory; pass --home"),
    }
}

pub fn resolve_backup_dir(targets: &TargetArgs) -> Result<PathBuf> {
    match &targets.backup_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(wtport_core::apply::default_backup_dir(&resolve_home(targets)?)),
    }
}

/// `--settings-target`, or the installed Windows Terminal settings.
pub fn resolve_settings_target(targets: &TargetArgs) -> Result<PathBuf> {
    match &targets.settings_target {
        Some(path) => Ok(path.clone()),
        None => Ok(resolve_settings_path(targets.local_app_data.as_deref())?),
    }
}
