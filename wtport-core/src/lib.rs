// wtport-core/src/lib.rs
//! # wtport Core Library
//!
//! `wtport-core` holds the platform-independent logic for making a terminal
//! setup shareable: it scrubs a shell profile of private paths, credentials and
//! sensitive tool aliases, normalizes a Windows Terminal `settings.json`, and
//! keeps a checksummed manifest and a Markdown log of every artifact it writes.
//!
//! ## Modules
//!
//! * `config`: `SanitizationRule`s and `RuleConfig`, including the embedded defaults.
//! * `sanitizers`: Compiles rules into regular expressions.
//! * `engine`: The `SanitizationEngine` trait.
//! * `engines`: Concrete engine implementations.
//! * `denylist`: Alias denylist filtering.
//! * `report`: The `Reporter` sink and its `ReportEvent`s.
//! * `checksum`: SHA-256 of written artifacts.
//! * `manifest`: Artifact manifest load/merge/save.
//! * `sanitization_log`: Append-only sanitization journal.
//! * `paths`: Default repository layout.
//! * `pipeline`: One-shot profile sanitization.
//! * `settings`: Windows Terminal settings export and profile injection.
//! * `apply`: Applying artifacts locally, with backups.
//! * `diagnostics`: Read-only repository health checks.
//! * `errors`: The `PortableError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use wtport_core::{sanitize_string, RuleConfig};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = RuleConfig::load_default_rules()?;
//!     let input = "export PATH=/home/alice/bin\nalias hydra=hydra\n";
//!     let output = sanitize_string(config, input)?;
//!     assert_eq!(output, "export PATH=$HOME/bin\n");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! File-level operations return [`PortableError`]; configuration loading and
//! engine construction use `anyhow::Error` with context.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod apply;
pub mod checksum;
pub mod config;
pub mod denylist;
pub mod diagnostics;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod manifest;
pub mod paths;
pub mod pipeline;
pub mod report;
pub mod sanitization_log;
pub mod sanitizers;
pub mod settings;

/// Rule configuration types and helpers.
pub use config::{merge_rules, validate_rules, RuleConfig, SanitizationRule, MAX_PATTERN_LENGTH};

pub use errors::PortableError;

pub use engine::{AnalysisSummary, RuleHit, SanitizationEngine};
pub use engines::regex_engine::RegexEngine;

pub use denylist::{strip_denylisted_aliases, DenylistSet};

pub use report::{LogReporter, NullReporter, RecordingReporter, ReportEvent, Reporter};

pub use checksum::{hash_artifact, hash_file};

pub use manifest::{
    load_manifest, record_artifact, save_manifest, upsert_entry, validate_manifest, Manifest, ManifestEntry,
};

pub use paths::ArtifactPaths;

/// One-shot sanitization entry points.
pub use pipeline::{sanitize_profile, sanitize_string, SanitizeOutcome, SanitizeRequest};

pub use settings::{export_settings, resolve_settings_path, ExportResult};

pub use apply::{apply_profile, list_backups, restore_backup, ApplyMode, ApplyPlan, ApplyResult};

pub use diagnostics::{run_diagnostics, DiagnosticResult, DiagnosticStatus};

pub use sanitizers::compiler::{compile_rules, CompiledRule, CompiledRules};
