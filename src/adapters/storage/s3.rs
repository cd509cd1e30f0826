//! S3 object storage
//!
//! Talks to Amazon S3, or any S3-compatible service when an endpoint is
//! configured, through the `object_store` crate. A client is built per call
//! for the bucket being addressed; nothing is shared between invocations.

use super::traits::ObjectStorage;
use crate::config::StorageConfig;
use crate::domain::{ObfuscatorError, Result};
use async_trait::async_trait;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use secrecy::ExposeSecret;

/// S3-backed [`ObjectStorage`]
#[derive(Debug, Clone)]
pub struct S3Storage {
    config: StorageConfig,
}

impl S3Storage {
    /// Create a new S3 storage client
    ///
    /// Settings left unset in `config` fall back to the standard `AWS_*`
    /// environment variables.
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    fn store_for(&self, bucket: &str) -> Result<AmazonS3> {
        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);

        if let Some(ref region) = self.config.region {
            builder = builder.with_region(region);
        }
        if let Some(ref endpoint) = self.config.endpoint {
            builder = builder.with_endpoint(endpoint);
        }
        if self.config.allow_http {
            builder = builder.with_allow_http(true);
        }
        if let (Some(key_id), Some(secret)) =
            (&self.config.access_key_id, &self.config.secret_access_key)
        {
            builder = builder
                .with_access_key_id(key_id)
                .with_secret_access_key(secret.expose_secret().to_string());
        }

        builder.build().map_err(|e| {
            ObfuscatorError::Storage(format!(
                "Failed to build S3 client for bucket '{bucket}': {e}"
            ))
        })
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn head_exists(&self, bucket: &str, key: &str) -> Result<bool> {
        let store = self.store_for(bucket)?;

        match store.head(&ObjectPath::from(key)).await {
            Ok(meta) => {
                tracing::debug!(bucket, key, size = meta.size, "Object found");
                Ok(true)
            }
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(ObfuscatorError::Storage(format!(
                "HEAD s3://{bucket}/{key} failed: {e}"
            ))),
        }
    }

    async fn get_content(&self, bucket: &str, key: &str) -> Result<String> {
        let store = self.store_for(bucket)?;

        let body = store.get(&ObjectPath::from(key)).await?.bytes().await?;
        tracing::debug!(bucket, key, bytes = body.len(), "Object downloaded");

        String::from_utf8(body.to_vec()).map_err(|e| {
            ObfuscatorError::Storage(format!("s3://{bucket}/{key} is not valid UTF-8: {e}"))
        })
    }

    async fn put_content(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        let store = self.store_for(bucket)?;
        let size = body.len();

        store
            .put(&ObjectPath::from(key), PutPayload::from(body))
            .await
            .map_err(|e| {
                ObfuscatorError::Storage(format!("PUT s3://{bucket}/{key} failed: {e}"))
            })?;

        tracing::debug!(bucket, key, bytes = size, "Object uploaded");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "s3"
    }
}
