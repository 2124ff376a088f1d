// wtport/src/lib.rs
//! # wtport CLI Application
//!
//! Terminal front end for `wtport-core`: argument parsing, logging setup,
//! colored console output and the subcommand implementations.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod reporter;
pub mod ui;
