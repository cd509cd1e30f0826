//! Field-masking engine
//!
//! Reads a validated source as CSV, replaces the value of every sensitive
//! field with [`REDACTION_TOKEN`](crate::domain::REDACTION_TOKEN) and writes
//! the table back out with header and row order preserved.
//!
//! # Row shape
//!
//! A row shorter than the header is padded with empty values. A row longer
//! than the header fails with [`ObfuscatorError::MalformedRecord`]. Other
//! codec errors surface as [`ObfuscatorError::Csv`].
//!
//! A leading UTF-8 byte-order mark is dropped by the reader, so the first
//! header name matches without it and the output is written without a BOM.

use crate::adapters::storage::ObjectStorage;
use crate::domain::{
    Header, ObfuscatorError, RedactionRequest, RedactionResult, Result, SourceLocation,
    TabularRecord, ValidatedSource,
};
use crate::log_redaction_complete;
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use std::sync::Arc;
use std::time::Instant;

/// Applies redaction to validated requests
///
/// # Examples
///
/// ```no_run
/// use gdpr_obfuscator::adapters::storage::InMemoryStorage;
/// use gdpr_obfuscator::core::masking::FieldMaskingEngine;
/// use gdpr_obfuscator::core::resolver::RequestResolver;
/// use std::sync::Arc;
///
/// # async fn example() -> gdpr_obfuscator::domain::Result<()> {
/// let storage = Arc::new(
///     InMemoryStorage::new().with_object("bucket", "data.csv", "name,email\nAlice,a@x.com\n"),
/// );
/// let request = RequestResolver::new(storage.clone())
///     .resolve(r#"{"file_to_obfuscate": "s3://bucket/data.csv", "pii_fields": ["email"]}"#)
///     .await?;
///
/// let result = FieldMaskingEngine::new(storage).mask(&request).await?;
/// assert_eq!(result.as_str(), "name,email\nAlice,***\n");
/// # Ok(())
/// # }
/// ```
pub struct FieldMaskingEngine {
    storage: Arc<dyn ObjectStorage>,
}

impl FieldMaskingEngine {
    /// Create an engine that reads object sources through `storage`
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    /// Mask a validated request
    ///
    /// # Errors
    ///
    /// - [`ObfuscatorError::SourceReadFailure`] if the content cannot be read
    ///   (including content that is not UTF-8)
    /// - [`ObfuscatorError::MalformedRecord`] / [`ObfuscatorError::Csv`] for
    ///   content the CSV codec rejects
    pub async fn mask(&self, request: &RedactionRequest) -> Result<RedactionResult> {
        let start = Instant::now();

        let content = self.read_source(request.source()).await?;
        let result = mask_csv(&content, request.sensitive_fields())?;

        log_redaction_complete!(
            request.source(),
            result.row_count(),
            result.masked_cells(),
            start.elapsed()
        );

        Ok(result)
    }

    async fn read_source(&self, source: &ValidatedSource) -> Result<String> {
        match source.location() {
            SourceLocation::ObjectStore { bucket, key } => self
                .storage
                .get_content(bucket, key)
                .await
                .map_err(|e| ObfuscatorError::read_failure(source.as_str(), e)),
            SourceLocation::Local(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|e| ObfuscatorError::read_failure(source.as_str(), e))?;
                String::from_utf8(bytes).map_err(|e| {
                    ObfuscatorError::read_failure(source.as_str(), format!("not valid UTF-8: {e}"))
                })
            }
        }
    }
}

/// Mask CSV text in memory
///
/// The first line is the header. Every column whose name is in `fields` has
/// each of its values replaced by the redaction token. Names missing from the
/// header are ignored.
///
/// # Examples
///
/// ```
/// use gdpr_obfuscator::core::masking::mask_csv;
///
/// let fields = vec!["name".to_string(), "email_address".to_string()];
/// let result = mask_csv("name,email_address\nAlice,a@x.com\n", &fields).unwrap();
/// assert_eq!(result.as_str(), "name,email_address\n***,***\n");
/// ```
pub fn mask_csv(content: &str, fields: &[String]) -> Result<RedactionResult> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let header = Header::new(reader.headers()?.iter());

    let mut targets: Vec<&str> = Vec::new();
    for field in fields {
        if !header.contains(field) {
            tracing::debug!(field = %field, "Field not present in header, skipping");
        } else if !targets.contains(&field.as_str()) {
            targets.push(field);
        }
    }

    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::with_capacity(content.len()));

    if !header.is_empty() {
        writer.write_record(header.names())?;
    }

    let mut row_count = 0;
    let mut masked_cells = 0;
    for row in reader.records() {
        let mut record = to_record(&header, &row?)?;
        for name in &targets {
            masked_cells += record.redact(&header, name);
        }
        writer.write_record(record.values())?;
        row_count += 1;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ObfuscatorError::Csv(format!("Failed to flush output: {}", e.error())))?;
    let output = String::from_utf8(bytes)
        .map_err(|e| ObfuscatorError::Csv(format!("Output is not valid UTF-8: {e}")))?;

    Ok(RedactionResult::new(header, row_count, masked_cells, output))
}

fn to_record(header: &Header, row: &StringRecord) -> Result<TabularRecord> {
    if row.len() > header.len() {
        return Err(ObfuscatorError::MalformedRecord {
            line: row.position().map(|p| p.line()).unwrap_or_default(),
            expected: header.len(),
            found: row.len(),
        });
    }

    let mut values: Vec<String> = row.iter().map(String::from).collect();
    values.resize(header.len(), String::new());
    Ok(TabularRecord::new(values))
}
