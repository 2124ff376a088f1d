// wtport/src/ui/mod.rs
//! Console presentation: theme, status messages, diffs and tables.

pub mod diff_viewer;
pub mod output_format;
pub mod summary;
pub mod theme;
