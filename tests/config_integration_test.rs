//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold ENV_MUTEX to avoid
//! interference between tests.

use gdpr_obfuscator::config::{load_config, StorageBackend};
use gdpr_obfuscator::domain::ObfuscatorError;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("OBFUSCATOR_APPLICATION_LOG_LEVEL");
    std::env::remove_var("OBFUSCATOR_STORAGE_BACKEND");
    std::env::remove_var("OBFUSCATOR_STORAGE_REGION");
    std::env::remove_var("OBFUSCATOR_HANDLER_PII_FIELDS");
    std::env::remove_var("OBFUSCATOR_HANDLER_OUTPUT_PREFIX");
    std::env::remove_var("TEST_OBFUSCATOR_SECRET");
    std::env::remove_var("TEST_OBFUSCATOR_MISSING_A");
    std::env::remove_var("TEST_OBFUSCATOR_MISSING_B");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[storage]
backend = "s3"
region = "eu-west-2"
endpoint = "http://localhost:4566"
allow_http = true
access_key_id = "test"
secret_access_key = "test-secret"

[handler]
pii_fields = ["name", "email_address"]
output_prefix = "obfuscated/"

[logging]
local_enabled = false
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.storage.backend, StorageBackend::S3);
    assert_eq!(config.storage.region.as_deref(), Some("eu-west-2"));
    assert!(config.storage.allow_http);
    assert_eq!(
        config
            .storage
            .secret_access_key
            .as_ref()
            .unwrap()
            .expose_secret()
            .as_ref(),
        "test-secret"
    );
    assert_eq!(config.handler.pii_fields, ["name", "email_address"]);
    assert_eq!(config.handler.output_prefix.as_deref(), Some("obfuscated/"));
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_empty_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.storage.backend, StorageBackend::S3);
    assert!(config.handler.pii_fields.is_empty());
    assert!(config.handler.output_prefix.is_none());
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_OBFUSCATOR_SECRET", "from-env");

    let file = write_config(
        r#"
[storage]
access_key_id = "AKIA"
secret_access_key = "${TEST_OBFUSCATOR_SECRET}"
"#,
    );

    let config = load_config(file.path()).unwrap();
    cleanup_env_vars();

    assert_eq!(
        config
            .storage
            .secret_access_key
            .as_ref()
            .unwrap()
            .expose_secret()
            .as_ref(),
        "from-env"
    );
}

#[test]
fn test_missing_env_vars_reported_together() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
# secret_access_key = "${COMMENTED_OUT_VAR}"
[storage]
region = "${TEST_OBFUSCATOR_MISSING_A}"
endpoint = "${TEST_OBFUSCATOR_MISSING_B}"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    let message = err.to_string();

    assert!(matches!(err, ObfuscatorError::Configuration(_)));
    assert!(message.contains("TEST_OBFUSCATOR_MISSING_A"));
    assert!(message.contains("TEST_OBFUSCATOR_MISSING_B"));
    assert!(!message.contains("COMMENTED_OUT_VAR"));
}

#[test]
fn test_env_overrides_take_precedence() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("OBFUSCATOR_STORAGE_BACKEND", "memory");
    std::env::set_var("OBFUSCATOR_HANDLER_PII_FIELDS", "name, email ,,phone");
    std::env::set_var("OBFUSCATOR_HANDLER_OUTPUT_PREFIX", "masked/");

    let file = write_config(
        r#"
[handler]
pii_fields = ["ignored"]
"#,
    );

    let config = load_config(file.path());
    cleanup_env_vars();
    let config = config.unwrap();

    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert_eq!(config.handler.pii_fields, ["name", "email", "phone"]);
    assert_eq!(config.handler.output_prefix.as_deref(), Some("masked/"));
}

#[test]
fn test_invalid_override_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("OBFUSCATOR_STORAGE_BACKEND", "gcs");

    let file = write_config("");
    let result = load_config(file.path());
    cleanup_env_vars();

    assert!(matches!(result, Err(ObfuscatorError::Configuration(_))));
}

#[test]
fn test_validation_failure() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[storage]
endpoint = "http://localhost:4566"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("allow_http"));
}

#[test]
fn test_missing_file() {
    let err = load_config("/nonexistent/obfuscator.toml").unwrap_err();
    assert!(err.to_string().contains("Configuration file not found"));
}
