//! errors.rs - Custom error types for the wtport-core library.
//!
//! Every fallible file operation in the core reports one of these variants so
//! the CLI can tell a missing input apart from a malformed one.
//!
//! License: MIT OR APACHE 2.0

use std::path::PathBuf;
use thiserror::Error;

/// All error kinds surfaced by `wtport-core`.
///
/// `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PortableError {
    /// A required input file is absent.
    #[error("{what} not found at {}", path.display())]
    NotFound { path: PathBuf, what: String },

    /// A file exists but its content is not the JSON shape we expect.
    #[error("Invalid data in {}: {reason}", path.display())]
    Data { path: PathBuf, reason: String },

    #[error("Failed to compile sanitization rule '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

impl PortableError {
    pub fn not_found(path: impl Into<PathBuf>, what: impl Into<String>) -> Self {
        PortableError::NotFound { path: path.into(), what: what.into() }
    }

    pub fn data(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PortableError::Data { path: path.into(), reason: reason.into() }
    }
}

pub type Result<T, E = PortableError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_path() {
        let err = PortableError::not_found("/tmp/.zshrc", "Shell profile");
        assert_eq!(err.to_string(), "Shell profile not found at /tmp/.zshrc");
    }

    #[test]
    fn data_message_includes_reason() {
        let err = PortableError::data("manifest.json", "top level is not an object");
        assert!(err.to_string().contains("top level is not an object"));
    }
}
