//! Configuration schema types
//!
//! This module defines the configuration structure for the obfuscator. Every
//! section is optional; a missing section takes its defaults.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

/// Object storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Amazon S3 or an S3-compatible service
    #[default]
    S3,
    /// Process-local map (offline runs, tests)
    Memory,
}

/// Main obfuscator configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ObfuscatorConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Object storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Event handler settings
    #[serde(default)]
    pub handler: HandlerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ObfuscatorConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.storage.validate()?;
        self.handler.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Object storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Storage backend
    #[serde(default)]
    pub backend: StorageBackend,

    /// AWS region; falls back to `AWS_REGION` / `AWS_DEFAULT_REGION`
    #[serde(default)]
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible services (e.g. LocalStack, MinIO)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Permit plain HTTP endpoints
    #[serde(default)]
    pub allow_http: bool,

    /// Static access key ID; falls back to the AWS credential chain
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Static secret access key
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref endpoint) = self.endpoint {
            let url = Url::parse(endpoint)
                .map_err(|e| format!("Invalid storage.endpoint '{endpoint}': {e}"))?;

            match url.scheme() {
                "https" => {}
                "http" if self.allow_http => {}
                "http" => {
                    return Err(
                        "storage.endpoint uses http:// but storage.allow_http is false"
                            .to_string(),
                    )
                }
                other => {
                    return Err(format!(
                        "storage.endpoint must use http or https, got '{other}'"
                    ))
                }
            }
        }

        if self.access_key_id.is_some() != self.secret_access_key.is_some() {
            return Err(
                "storage.access_key_id and storage.secret_access_key must be set together"
                    .to_string(),
            );
        }

        Ok(())
    }
}

/// Event handler configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HandlerConfig {
    /// Field names redacted from every uploaded object
    #[serde(default)]
    pub pii_fields: Vec<String>,

    /// Key prefix (a directory such as `masked/`) the masked copy is written
    /// under; `None` overwrites the upload
    #[serde(default)]
    pub output_prefix: Option<String>,
}

impl HandlerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.pii_fields.iter().any(|f| f.is_empty()) {
            return Err("handler.pii_fields cannot contain empty names".to_string());
        }

        if let Some(ref prefix) = self.output_prefix {
            if prefix.is_empty() {
                return Err("handler.output_prefix cannot be empty".to_string());
            }
            if !prefix.ends_with('/') || prefix.starts_with('/') {
                return Err(format!(
                    "handler.output_prefix '{prefix}' must be a key prefix ending in '/', e.g. 'masked/'"
                ));
            }
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Emit console logs as JSON
    #[serde(default)]
    pub json_console: bool,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            json_console: false,
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
