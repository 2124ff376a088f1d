// wtport/src/cli.rs
//! Command-line interface definition for wtport: global flags, subcommands
//! and their arguments.
//! License: MIT OR APACHE 2.0

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use wtport_core::ApplyMode;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "wtport",
    version = env!("CARGO_PKG_VERSION"),
    about = "Export, sanitize and re-apply a Windows Terminal + zsh setup",
    long_about = "wtport turns a personal Windows Terminal settings.json and ~/.zshrc into shareable artifacts. Private paths, credentials and sensitive tool aliases are scrubbed, every artifact is checksummed into a manifest, and the result can be applied back onto another machine with automatic backups.",
    arg_required_else_help = true,
)]
pub struct Cli {
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Custom rule configuration merged on top of the built-in rules.
    #[arg(
        long = "config",
        value_name = "FILE",
        env = "WTPORT_CONFIG",
        global = true,
        help = "Path to a custom sanitization rule file (YAML)."
    )]
    pub config: Option<PathBuf>,

    /// Root of the artifact repository.
    #[arg(
        long = "artifacts-dir",
        value_name = "DIR",
        env = "WTPORT_ARTIFACTS_DIR",
        default_value = ".",
        global = true,
        help = "Repository root holding artifacts/ and docs/."
    )]
    pub artifacts_dir: PathBuf,

    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Sanitize a shell profile into artifacts/zshrc.portable.")]
    Sanitize(SanitizeCommand),

    #[command(about = "Report what sanitization would change, without writing anything.")]
    Scan(ScanCommand),

    #[command(about = "Export and normalize the live Windows Terminal settings.")]
    Export(ExportCommand),

    #[command(about = "Apply the portable artifacts to this machine.")]
    Apply(ApplyCommand),

    #[command(subcommand, about = "List or restore backups taken by apply.")]
    Backups(BackupsCommand),

    #[command(about = "Check the environment and the artifact repository.")]
    Diagnostics,
}

#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    #[arg(long, short = 's', value_name = "FILE", help = "Shell profile to sanitize (defaults to ~/.zshrc).")]
    pub source: Option<PathBuf>,

    #[arg(long, short = 'o', value_name = "FILE", help = "Write the sanitized profile here instead of artifacts/zshrc.portable.")]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Manifest to update (defaults to artifacts/manifest.json).")]
    pub manifest: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Sanitization log (defaults to docs/SANITIZATION_REPORT.md).")]
    pub log: Option<PathBuf>,

    #[arg(long, short = 'D', help = "Show a unified diff of the changes made.")]
    pub diff: bool,

    #[command(flatten)]
    pub rules: RuleSelection,
}

#[derive(Parser, Debug)]
pub struct ScanCommand {
    #[arg(long, short = 's', value_name = "FILE", help = "Shell profile to scan (defaults to ~/.zshrc).")]
    pub source: Option<PathBuf>,

    #[arg(long = "json", help = "Print the scan summary as JSON to stdout.")]
    pub json: bool,

    #[arg(
        long = "fail-over-threshold",
        value_name = "N",
        help = "Exit with a non-zero code if the number of findings exceeds N."
    )]
    pub fail_over_threshold: Option<usize>,

    #[command(flatten)]
    pub rules: RuleSelection,
}

/// `--enable` / `--disable` rule name lists.
#[derive(Args, Debug, Default, Clone)]
pub struct RuleSelection {
    #[arg(long, short = 'e', value_delimiter = ',', help = "Enable these rule names (comma-separated).")]
    pub enable: Vec<String>,

    #[arg(long, short = 'x', value_delimiter = ',', help = "Disable these rule names (comma-separated).")]
    pub disable: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct ExportCommand {
    #[arg(long, value_name = "FILE", help = "Read this settings.json instead of locating the installed one.")]
    pub settings: Option<PathBuf>,

    #[arg(long, short = 'o', value_name = "FILE", help = "Destination (defaults to artifacts/settings.json).")]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Manifest to update (defaults to artifacts/manifest.json).")]
    pub manifest: Option<PathBuf>,

    #[arg(long = "local-app-data", value_name = "DIR", env = "LOCALAPPDATA", hide_env_values = true)]
    pub local_app_data: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ApplyModeChoice {
    /// Back up, then overwrite the terminal settings and ~/.zshrc
    Default,
    /// Inject the portable profile alongside the existing setup
    Copy,
    /// Promote the previously copied profile to default
    Promote,
}

impl From<ApplyModeChoice> for ApplyMode {
    fn from(choice: ApplyModeChoice) -> Self {
        match choice {
            ApplyModeChoice::Default => ApplyMode::Default,
            ApplyModeChoice::Copy => ApplyMode::Copy,
            ApplyModeChoice::Promote => ApplyMode::Promote,
        }
    }
}

#[derive(Parser, Debug)]
pub struct ApplyCommand {
    #[arg(long, short = 'm', value_enum, default_value = "default", help = "How to apply the portable profile.")]
    pub mode: ApplyModeChoice,

    #[arg(long = "dry-run", help = "Report what would change without touching any file.")]
    pub dry_run: bool,

    #[command(flatten)]
    pub targets: TargetArgs,
}

/// Where the local settings, shell profile and backups live.
#[derive(Args, Debug, Default, Clone)]
pub struct TargetArgs {
    #[arg(long = "settings-target", value_name = "FILE", help = "Local settings.json to update (located automatically otherwise).")]
    pub settings_target: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Home directory holding .zshrc (defaults to the current user's).")]
    pub home: Option<PathBuf>,

    #[arg(long = "backup-dir", value_name = "DIR", help = "Backup directory (defaults to ~/wtport/backups).")]
    pub backup_dir: Option<PathBuf>,

    #[arg(long = "local-app-data", value_name = "DIR", env = "LOCALAPPDATA", hide_env_values = true)]
    pub local_app_data: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum BackupsCommand {
    #[command(about = "List available backups, oldest first.")]
    List {
        #[command(flatten)]
        targets: TargetArgs,
    },
    #[command(about = "Restore the backup with the given list index (1-based).")]
    Restore {
        #[arg(value_name = "INDEX")]
        index: usize,

        #[command(flatten)]
        targets: TargetArgs,
    },
}
