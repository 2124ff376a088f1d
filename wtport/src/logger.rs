// wtport/src/logger.rs
//! `env_logger` setup for the CLI.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initialises logging once. `RUST_LOG` is honoured unless `level_override`
/// is given. Repeated calls are ignored.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).target(Target::Stderr);
    let _ = builder.try_init();
}
