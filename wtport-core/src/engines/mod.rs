// wtport-core/src/engines/mod.rs
//! Concrete `SanitizationEngine` implementations.
//!
//! Each engine lives in its own file and is declared here.

pub mod regex_engine;
