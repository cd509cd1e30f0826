//! Request resolution
//!
//! Turns a raw JSON payload into a [`RedactionRequest`]. The source named in
//! the payload is checked for existence here, before any content is read, so
//! a bad request fails fast with [`ObfuscatorError::SourceNotFound`].

use crate::adapters::storage::ObjectStorage;
use crate::domain::{
    ObfuscatorError, RedactionRequest, Result, SourceLocation, ValidatedSource,
    FILE_TO_OBFUSCATE_KEY, PII_FIELDS_KEY,
};
use serde_json::Value;
use std::sync::Arc;

/// Decoded request payload, before any source validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPayload {
    /// Raw source descriptor
    pub file_to_obfuscate: String,
    /// Field names as listed in the payload
    pub pii_fields: Vec<String>,
}

/// Validates redaction requests
///
/// # Examples
///
/// ```no_run
/// use gdpr_obfuscator::adapters::storage::InMemoryStorage;
/// use gdpr_obfuscator::core::resolver::RequestResolver;
/// use std::sync::Arc;
///
/// # async fn example() -> gdpr_obfuscator::domain::Result<()> {
/// let storage = Arc::new(InMemoryStorage::new().with_object("bucket", "data.csv", "name\nAlice\n"));
/// let resolver = RequestResolver::new(storage);
///
/// let request = resolver
///     .resolve(r#"{"file_to_obfuscate": "s3://bucket/data.csv", "pii_fields": ["name"]}"#)
///     .await?;
/// assert_eq!(request.sensitive_fields(), ["name"]);
/// # Ok(())
/// # }
/// ```
pub struct RequestResolver {
    storage: Arc<dyn ObjectStorage>,
}

impl RequestResolver {
    /// Create a resolver that checks object sources through `storage`
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    /// Parse and validate a request payload
    ///
    /// # Errors
    ///
    /// - [`ObfuscatorError::InvalidRequest`] for an empty payload, a payload
    ///   that is not an object, wrongly typed keys, or an empty source
    /// - [`ObfuscatorError::MalformedPayload`] for invalid JSON
    /// - [`ObfuscatorError::MissingField`] when `file_to_obfuscate` is absent
    /// - [`ObfuscatorError::InvalidSourceUri`] for an unusable `s3://` URI
    /// - [`ObfuscatorError::SourceNotFound`] when the source does not exist
    ///   or is an empty local file
    pub async fn resolve(&self, payload: &str) -> Result<RedactionRequest> {
        let RequestPayload {
            file_to_obfuscate,
            pii_fields,
        } = parse_payload(payload)?;

        let location = SourceLocation::parse(&file_to_obfuscate)?;

        if !self.source_exists(&file_to_obfuscate, &location).await {
            return Err(ObfuscatorError::SourceNotFound(file_to_obfuscate));
        }

        tracing::debug!(
            source = %file_to_obfuscate,
            pii_fields = pii_fields.len(),
            "Request resolved"
        );

        Ok(RedactionRequest::new(
            ValidatedSource::new(file_to_obfuscate, location),
            pii_fields,
        ))
    }

    async fn source_exists(&self, raw: &str, location: &SourceLocation) -> bool {
        match location {
            SourceLocation::ObjectStore { bucket, key } => {
                match self.storage.head_exists(bucket, key).await {
                    Ok(exists) => exists,
                    Err(e) => {
                        // Any storage failure counts as "does not exist"
                        tracing::warn!(
                            source = %raw,
                            backend = self.storage.backend_name(),
                            error = %e,
                            "Existence check failed, treating source as missing"
                        );
                        false
                    }
                }
            }
            SourceLocation::Local(path) => match tokio::fs::metadata(path).await {
                Ok(meta) => meta.is_file() && meta.len() > 0,
                Err(_) => false,
            },
        }
    }
}

/// Decode a request payload without touching any source
///
/// # Errors
///
/// See [`RequestResolver::resolve`]; everything except the source checks.
pub fn parse_payload(payload: &str) -> Result<RequestPayload> {
    if payload.is_empty() {
        return Err(ObfuscatorError::InvalidRequest(
            "payload cannot be empty".to_string(),
        ));
    }

    let value: Value =
        serde_json::from_str(payload).map_err(|e| ObfuscatorError::MalformedPayload {
            payload: payload.to_string(),
            offset: byte_offset(payload, e.line(), e.column()),
        })?;

    let Value::Object(mut object) = value else {
        return Err(ObfuscatorError::InvalidRequest(
            "payload must be a JSON object".to_string(),
        ));
    };

    let file_to_obfuscate = match object.remove(FILE_TO_OBFUSCATE_KEY) {
        None => return Err(ObfuscatorError::MissingField(FILE_TO_OBFUSCATE_KEY.to_string())),
        Some(Value::String(s)) if s.is_empty() => {
            return Err(ObfuscatorError::InvalidRequest(format!(
                "{FILE_TO_OBFUSCATE_KEY} cannot be empty"
            )))
        }
        Some(Value::String(s)) => s,
        Some(other) => {
            return Err(ObfuscatorError::InvalidRequest(format!(
                "{FILE_TO_OBFUSCATE_KEY} must be a string, got {}",
                json_type_name(&other)
            )))
        }
    };

    let pii_fields = match object.remove(PII_FIELDS_KEY) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s),
                other => Err(ObfuscatorError::InvalidRequest(format!(
                    "{PII_FIELDS_KEY}[{i}] must be a string, got {}",
                    json_type_name(&other)
                ))),
            })
            .collect::<Result<Vec<_>>>()?,
        Some(other) => {
            return Err(ObfuscatorError::InvalidRequest(format!(
                "{PII_FIELDS_KEY} must be a list of strings, got {}",
                json_type_name(&other)
            )))
        }
    };

    Ok(RequestPayload {
        file_to_obfuscate,
        pii_fields,
    })
}

/// Converts serde_json's 1-based line/column into a byte offset
fn byte_offset(payload: &str, line: usize, column: usize) -> usize {
    let preceding: usize = payload
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (preceding + column.saturating_sub(1)).min(payload.len())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
