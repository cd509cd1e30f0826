//! Configuration management for the obfuscator.
//!
//! # Overview
//!
//! The obfuscator reads an optional TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `OBFUSCATOR_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`StorageConfig`] - Object storage backend, region, endpoint, credentials
//! - [`HandlerConfig`] - Fields redacted by the event handler, output naming
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [storage]
//! region = "eu-west-2"
//! endpoint = "http://localhost:4566"
//! allow_http = true
//! access_key_id = "test"
//! secret_access_key = "${OBFUSCATOR_SECRET}"
//!
//! [handler]
//! pii_fields = ["name", "email_address"]
//! output_prefix = "obfuscated/"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gdpr_obfuscator::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("obfuscator.toml")?;
//! println!("Storage backend: {:?}", config.storage.backend);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, DEFAULT_CONFIG_PATH};
pub use schema::{
    ApplicationConfig, HandlerConfig, LoggingConfig, ObfuscatorConfig, StorageBackend,
    StorageConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
