//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable or JSON console logs on stderr
//! - Configurable log levels
//! - Local JSON file logging with rotation
//!
//! Log fields carry source descriptors, field names and counts. Cell values
//! are never logged.
//!
//! # Example
//!
//! ```no_run
//! use gdpr_obfuscator::logging::init_logging;
//! use gdpr_obfuscator::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the completion of a masking run
///
/// # Example
///
/// ```no_run
/// use gdpr_obfuscator::log_redaction_complete;
/// use std::time::Duration;
///
/// log_redaction_complete!("s3://bucket/data.csv", 120, 240, Duration::from_millis(8));
/// ```
#[macro_export]
macro_rules! log_redaction_complete {
    ($source:expr, $rows:expr, $masked:expr, $duration:expr) => {
        tracing::info!(
            source = %$source,
            rows = $rows,
            masked_cells = $masked,
            duration_ms = $duration.as_millis() as u64,
            "Redaction completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use gdpr_obfuscator::log_error_with_context;
/// use gdpr_obfuscator::domain::ObfuscatorError;
///
/// let error = ObfuscatorError::SourceNotFound("data.csv".to_string());
/// log_error_with_context!(&error, "Request rejected");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
