//! S3 upload event handler
//!
//! Masks the object named by an upload notification and writes the masked
//! copy back to the same bucket. The field list comes from
//! [`HandlerConfig::pii_fields`]; the output key is either the upload's own
//! key or, with [`HandlerConfig::output_prefix`], the upload's key under that
//! key prefix (`masked/` turns `in/a.csv` into `masked/in/a.csv`). Uploads
//! under the output prefix are the handler's own copies and are skipped.
//!
//! Failures never escape as errors: every outcome is reported as a
//! [`HandlerResponse`] with status 200 or 500.

pub mod event;

pub use event::{decode_object_key, S3Event, S3EventRecord};

use crate::adapters::storage::ObjectStorage;
use crate::config::HandlerConfig;
use crate::core::Obfuscator;
use crate::domain::{ObfuscatorError, Result, FILE_TO_OBFUSCATE_KEY, PII_FIELDS_KEY};
use crate::log_error_with_context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Response returned to the invoking runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    /// JSON-encoded body
    pub body: String,
}

impl HandlerResponse {
    fn success(summary: &HandlerSummary) -> Self {
        let body = serde_json::to_string(summary)
            .unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string());
        Self {
            status_code: 200,
            body,
        }
    }

    fn failure(error: &ObfuscatorError) -> Self {
        Self {
            status_code: 500,
            body: json!(format!("Error: {error}")).to_string(),
        }
    }

    /// True for status codes in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Outcome of one handled event, serialized as the success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerSummary {
    pub bucket: String,
    pub key: String,
    pub output_key: String,
    pub rows: usize,
    pub masked_cells: usize,
    /// Set when the object lies under the output prefix and was left alone
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skipped: bool,
    pub processed_at: DateTime<Utc>,
}

/// Handles S3 upload notifications
pub struct EventHandler {
    obfuscator: Obfuscator,
    storage: Arc<dyn ObjectStorage>,
    config: HandlerConfig,
}

impl EventHandler {
    pub fn new(storage: Arc<dyn ObjectStorage>, config: HandlerConfig) -> Self {
        Self {
            obfuscator: Obfuscator::new(storage.clone()),
            storage,
            config,
        }
    }

    /// Handle a raw JSON event
    pub async fn handle_json(&self, raw: &str) -> HandlerResponse {
        match serde_json::from_str::<S3Event>(raw) {
            Ok(event) => self.handle(&event).await,
            Err(e) => {
                let error = ObfuscatorError::InvalidRequest(format!("invalid S3 event: {e}"));
                log_error_with_context!(&error, "Event rejected");
                HandlerResponse::failure(&error)
            }
        }
    }

    /// Handle a decoded event
    pub async fn handle(&self, event: &S3Event) -> HandlerResponse {
        match self.process(event).await {
            Ok(summary) => HandlerResponse::success(&summary),
            Err(e) => {
                log_error_with_context!(&e, "Event handling failed");
                HandlerResponse::failure(&e)
            }
        }
    }

    async fn process(&self, event: &S3Event) -> Result<HandlerSummary> {
        let (bucket, key) = event.target()?;

        if self.is_masked_copy(&key) {
            tracing::info!(bucket = %bucket, key = %key, "Skipping object under output prefix");
            return Ok(HandlerSummary {
                bucket,
                output_key: key.clone(),
                key,
                rows: 0,
                masked_cells: 0,
                skipped: true,
                processed_at: Utc::now(),
            });
        }

        let payload = json!({
            FILE_TO_OBFUSCATE_KEY: format!("s3://{bucket}/{key}"),
            PII_FIELDS_KEY: self.config.pii_fields,
        })
        .to_string();

        let output_key = self.output_key(&key);
        let result = self.obfuscator.obfuscate(&payload).await?;
        let rows = result.row_count();
        let masked_cells = result.masked_cells();

        self.storage
            .put_content(&bucket, &output_key, result.into_bytes())
            .await?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            output_key = %output_key,
            rows,
            masked_cells,
            "Masked copy written"
        );

        Ok(HandlerSummary {
            bucket,
            key,
            output_key,
            rows,
            masked_cells,
            skipped: false,
            processed_at: Utc::now(),
        })
    }

    /// Key the masked copy of `key` is written to
    pub fn output_key(&self, key: &str) -> String {
        match self.config.output_prefix.as_deref() {
            None => key.to_string(),
            Some(prefix) => format!("{prefix}{key}"),
        }
    }

    fn is_masked_copy(&self, key: &str) -> bool {
        self.config
            .output_prefix
            .as_deref()
            .is_some_and(|prefix| key.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryStorage;

    fn event(bucket: &str, key: &str) -> S3Event {
        serde_json::from_value(json!({
            "Records": [{
                "eventName": "ObjectCreated:Put",
                "s3": { "bucket": { "name": bucket }, "object": { "key": key } }
            }]
        }))
        .unwrap()
    }

    fn handler(storage: Arc<InMemoryStorage>, prefix: Option<&str>) -> EventHandler {
        EventHandler::new(
            storage,
            HandlerConfig {
                pii_fields: vec!["name".to_string(), "email".to_string()],
                output_prefix: prefix.map(str::to_string),
            },
        )
    }

    #[tokio::test]
    async fn test_overwrites_upload_without_prefix() {
        let storage = Arc::new(InMemoryStorage::new().with_object(
            "bucket",
            "new_data/file1.csv",
            "id,name,email\n1,Alice,a@x.com\n",
        ));

        let response = handler(storage.clone(), None)
            .handle(&event("bucket", "new_data/file1.csv"))
            .await;

        assert_eq!(response.status_code, 200);
        assert_eq!(
            storage.object("bucket", "new_data/file1.csv").unwrap(),
            b"id,name,email\n1,***,***\n"
        );

        let summary: HandlerSummary = serde_json::from_str(&response.body).unwrap();
        assert_eq!(summary.output_key, "new_data/file1.csv");
        assert_eq!(summary.rows, 1);
        assert_eq!(summary.masked_cells, 2);
    }

    #[tokio::test]
    async fn test_writes_copy_under_output_prefix() {
        let storage = Arc::new(InMemoryStorage::new().with_object(
            "bucket",
            "in/people.csv",
            "name,age\nBob,41\n",
        ));

        let response = handler(storage.clone(), Some("obfuscated/"))
            .handle(&event("bucket", "in/people.csv"))
            .await;

        assert!(response.is_success());
        assert_eq!(storage.object("bucket", "in/people.csv").unwrap(), b"name,age\nBob,41\n");
        assert_eq!(
            storage.object("bucket", "obfuscated/in/people.csv").unwrap(),
            b"name,age\n***,41\n"
        );
    }

    #[tokio::test]
    async fn test_skips_objects_under_output_prefix() {
        let storage = Arc::new(InMemoryStorage::new().with_object(
            "bucket",
            "obfuscated/in/people.csv",
            "name\n***\n",
        ));

        let response = handler(storage.clone(), Some("obfuscated/"))
            .handle(&event("bucket", "obfuscated/in/people.csv"))
            .await;

        assert_eq!(response.status_code, 200);
        let summary: HandlerSummary = serde_json::from_str(&response.body).unwrap();
        assert!(summary.skipped);
        assert_eq!(summary.output_key, "obfuscated/in/people.csv");
        assert_eq!(storage.get_calls(), 0);
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn test_file_name_resembling_prefix_is_still_masked() {
        let storage = Arc::new(InMemoryStorage::new().with_object(
            "bucket",
            "in/obfuscated_customers.csv",
            "name\nAlice\n",
        ));

        let response = handler(storage.clone(), Some("obfuscated/"))
            .handle(&event("bucket", "in/obfuscated_customers.csv"))
            .await;

        assert_eq!(response.status_code, 200);
        let summary: HandlerSummary = serde_json::from_str(&response.body).unwrap();
        assert!(!summary.skipped);
        assert_eq!(summary.masked_cells, 1);
        assert_eq!(
            storage.object("bucket", "obfuscated/in/obfuscated_customers.csv").unwrap(),
            b"name\n***\n"
        );
    }

    #[tokio::test]
    async fn test_missing_object_reports_500() {
        let storage = Arc::new(InMemoryStorage::new());

        let response = handler(storage.clone(), None)
            .handle(&event("bucket", "missing.csv"))
            .await;

        assert_eq!(response.status_code, 500);
        let body: String = serde_json::from_str(&response.body).unwrap();
        assert_eq!(
            body,
            "Error: The file 's3://bucket/missing.csv' does not exist or is not a valid file"
        );
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_handle_json_rejects_malformed_event() {
        let storage = Arc::new(InMemoryStorage::new());

        let response = handler(storage, None).handle_json("{\"Records\": 3}").await;

        assert_eq!(response.status_code, 500);
        assert!(response.body.starts_with("\"Error: "));
    }

    #[test]
    fn test_output_key() {
        let storage = Arc::new(InMemoryStorage::new());
        let plain = handler(storage.clone(), None);
        let prefixed = handler(storage, Some("masked/"));

        assert_eq!(plain.output_key("a/b/c.csv"), "a/b/c.csv");
        assert_eq!(prefixed.output_key("a/b/c.csv"), "masked/a/b/c.csv");
        assert_eq!(prefixed.output_key("c.csv"), "masked/c.csv");
    }

    #[test]
    fn test_response_serializes_status_code_name() {
        let response = HandlerResponse::failure(&ObfuscatorError::InvalidRequest("x".into()));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["statusCode"], 500);
    }
}
