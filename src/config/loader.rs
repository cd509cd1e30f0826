//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{ObfuscatorConfig, StorageBackend};
use super::secret::secret_string;
use crate::domain::errors::ObfuscatorError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Configuration file looked up when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "obfuscator.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into [`ObfuscatorConfig`]
/// 4. Applies environment variable overrides (OBFUSCATOR_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use gdpr_obfuscator::config::loader::load_config;
///
/// let config = load_config("obfuscator.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ObfuscatorConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ObfuscatorError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ObfuscatorError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: ObfuscatorConfig = toml::from_str(&contents)
        .map_err(|e| ObfuscatorError::Configuration(format!("Failed to parse TOML: {e}")))?;

    finish(config)
}

/// Loads configuration from `path`, or from the default location
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_PATH`] is used
/// when present; otherwise the built-in defaults apply. Environment overrides
/// and validation run in every case.
pub fn load_config_or_default(path: Option<&str>) -> Result<ObfuscatorConfig> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            finish(ObfuscatorConfig::default())
        }
    }
}

fn finish(mut config: ObfuscatorConfig) -> Result<ObfuscatorConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ObfuscatorError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. All missing variables are reported in a
/// single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ObfuscatorError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ObfuscatorError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using OBFUSCATOR_* prefix
///
/// Environment variables follow the pattern: OBFUSCATOR_<SECTION>_<KEY>
/// For example: OBFUSCATOR_STORAGE_REGION, OBFUSCATOR_HANDLER_PII_FIELDS
fn apply_env_overrides(config: &mut ObfuscatorConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("OBFUSCATOR_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Storage overrides
    if let Ok(val) = std::env::var("OBFUSCATOR_STORAGE_BACKEND") {
        config.storage.backend = match val.to_lowercase().as_str() {
            "s3" => StorageBackend::S3,
            "memory" => StorageBackend::Memory,
            _ => {
                return Err(ObfuscatorError::Configuration(format!(
                    "Invalid OBFUSCATOR_STORAGE_BACKEND: {val}"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("OBFUSCATOR_STORAGE_REGION") {
        config.storage.region = Some(val);
    }
    if let Ok(val) = std::env::var("OBFUSCATOR_STORAGE_ENDPOINT") {
        config.storage.endpoint = Some(val);
    }
    if let Ok(val) = std::env::var("OBFUSCATOR_STORAGE_ALLOW_HTTP") {
        config.storage.allow_http = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("OBFUSCATOR_STORAGE_ACCESS_KEY_ID") {
        config.storage.access_key_id = Some(val);
    }
    if let Ok(val) = std::env::var("OBFUSCATOR_STORAGE_SECRET_ACCESS_KEY") {
        config.storage.secret_access_key = Some(secret_string(val));
    }

    // Handler overrides
    if let Ok(val) = std::env::var("OBFUSCATOR_HANDLER_PII_FIELDS") {
        config.handler.pii_fields = val
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(String::from)
            .collect();
    }
    if let Ok(val) = std::env::var("OBFUSCATOR_HANDLER_OUTPUT_PREFIX") {
        config.handler.output_prefix = Some(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("OBFUSCATOR_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("OBFUSCATOR_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("OBFUSCATOR_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
    if let Ok(val) = std::env::var("OBFUSCATOR_LOGGING_JSON_CONSOLE") {
        config.logging.json_console = val.parse().unwrap_or(false);
    }

    Ok(())
}
