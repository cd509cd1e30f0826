//! CLI command implementations

pub mod obfuscate;
