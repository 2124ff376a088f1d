//! Rule compilation for the sanitization engines.
//!
//! This module turns the YAML-level `SanitizationRule`s into compiled regular
//! expressions once, up front, so applying them is infallible afterwards.

pub mod compiler;
