//! S3 event notification payloads
//!
//! Only the parts the handler reads are modelled; unknown fields are ignored.

use crate::domain::{ObfuscatorError, Result};
use serde::{Deserialize, Serialize};

/// S3 event notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Event {
    /// Notification records, normally exactly one
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

/// One notification record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3EventRecord {
    /// Event name, e.g. `ObjectCreated:Put`
    #[serde(rename = "eventName", default)]
    pub event_name: Option<String>,

    /// Bucket and object the event refers to
    pub s3: S3Entity,
}

/// Bucket/object pair of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Object {
    /// Object key, form-URL-encoded as delivered by S3
    pub key: String,

    #[serde(default)]
    pub size: Option<u64>,
}

impl S3Event {
    /// Bucket and decoded key of the first record
    ///
    /// # Errors
    ///
    /// Returns [`ObfuscatorError::InvalidRequest`] when the event has no
    /// records or names an empty bucket or key.
    pub fn target(&self) -> Result<(String, String)> {
        let record = self.records.first().ok_or_else(|| {
            ObfuscatorError::InvalidRequest("S3 event contains no records".to_string())
        })?;

        let bucket = record.s3.bucket.name.clone();
        let key = decode_object_key(&record.s3.object.key);

        if bucket.is_empty() || key.is_empty() {
            return Err(ObfuscatorError::InvalidRequest(
                "S3 event record has an empty bucket or key".to_string(),
            ));
        }

        Ok((bucket, key))
    }
}

/// Decodes an object key from an event notification
///
/// S3 encodes keys like form values: spaces become `+` and other reserved
/// characters are percent-escaped. A key containing a raw `&` or `=` was not
/// encoded this way and is returned unchanged.
pub fn decode_object_key(raw: &str) -> String {
    if raw.contains(['&', '=']) {
        return raw.to_string();
    }

    url::form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default()
}
