//! Redaction request model

use super::source::ValidatedSource;

/// Key holding the source descriptor in the request payload
pub const FILE_TO_OBFUSCATE_KEY: &str = "file_to_obfuscate";

/// Key holding the list of sensitive field names in the request payload
pub const PII_FIELDS_KEY: &str = "pii_fields";

/// A fully validated redaction request
///
/// Built by [`RequestResolver::resolve`](crate::core::resolver::RequestResolver::resolve)
/// and immutable afterwards. The field names are only used for lookup; the
/// request owns none of the underlying data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionRequest {
    source: ValidatedSource,
    sensitive_fields: Vec<String>,
}

impl RedactionRequest {
    pub(crate) fn new(source: ValidatedSource, fields: impl IntoIterator<Item = String>) -> Self {
        let mut sensitive_fields: Vec<String> = Vec::new();
        for field in fields {
            if !sensitive_fields.contains(&field) {
                sensitive_fields.push(field);
            }
        }

        Self {
            source,
            sensitive_fields,
        }
    }

    /// The validated source
    pub fn source(&self) -> &ValidatedSource {
        &self.source
    }

    /// Field names to redact, in request order and without duplicates
    pub fn sensitive_fields(&self) -> &[String] {
        &self.sensitive_fields
    }
}
