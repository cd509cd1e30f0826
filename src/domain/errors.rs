//! Domain error types
//!
//! This module defines the error hierarchy for the obfuscator.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main obfuscator error type
///
/// Every fallible operation of the resolver, the masking engine, the storage
/// adapters and the event handler reports one of these variants.
#[derive(Debug, Error)]
pub enum ObfuscatorError {
    /// Empty or wrongly shaped request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Request payload is not syntactically valid JSON
    #[error("Invalid JSON string provided at byte offset {offset}: {payload}")]
    MalformedPayload {
        /// The payload exactly as received
        payload: String,
        /// Byte offset of the syntax error
        offset: usize,
    },

    /// A required key is absent from the request payload
    #[error("Key '{0}' is missing in the JSON string")]
    MissingField(String),

    /// Object-storage URI cannot be split into bucket and key
    #[error("Invalid source URI: {0}")]
    InvalidSourceUri(String),

    /// Source failed the existence / non-emptiness check
    #[error("The file '{0}' does not exist or is not a valid file")]
    SourceNotFound(String),

    /// Source content could not be retrieved after validation
    #[error("Failed to read '{source_name}': {reason}")]
    SourceReadFailure {
        /// Literal source descriptor
        source_name: String,
        /// Underlying cause
        reason: String,
    },

    /// A data row carries more fields than the header
    #[error("Record on line {line} has {found} fields, header has {expected}")]
    MalformedRecord {
        /// 1-based line number of the offending record
        line: u64,
        /// Number of header fields
        expected: usize,
        /// Number of fields found in the record
        found: usize,
    },

    /// Delimited-text codec errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Storage adapter errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl ObfuscatorError {
    /// Builds a [`ObfuscatorError::SourceReadFailure`] for the given source
    pub fn read_failure(source_name: impl Into<String>, reason: impl ToString) -> Self {
        ObfuscatorError::SourceReadFailure {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ObfuscatorError {
    fn from(err: std::io::Error) -> Self {
        ObfuscatorError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ObfuscatorError {
    fn from(err: serde_json::Error) -> Self {
        ObfuscatorError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ObfuscatorError {
    fn from(err: toml::de::Error) -> Self {
        ObfuscatorError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv errors
impl From<csv::Error> for ObfuscatorError {
    fn from(err: csv::Error) -> Self {
        ObfuscatorError::Csv(err.to_string())
    }
}

// Conversion from object_store errors
impl From<object_store::Error> for ObfuscatorError {
    fn from(err: object_store::Error) -> Self {
        ObfuscatorError::Storage(err.to_string())
    }
}
