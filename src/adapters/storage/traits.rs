//! Object storage abstraction
//!
//! This module defines the capability the request resolver, the masking
//! engine and the event handler need from object storage. Implementations
//! are injected, so tests can run against [`InMemoryStorage`](super::memory::InMemoryStorage)
//! without any network access.

use crate::domain::Result;
use async_trait::async_trait;

/// Object storage client
///
/// Objects are addressed by bucket and key. Content is read as UTF-8 text and
/// written as raw bytes.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Check whether an object exists without transferring its content
    ///
    /// # Returns
    ///
    /// Returns `Ok(true)` if the object exists, `Ok(false)` if the store
    /// reports it as missing.
    ///
    /// # Errors
    ///
    /// Returns an error for any other failure (permissions, network, client
    /// construction).
    async fn head_exists(&self, bucket: &str, key: &str) -> Result<bool>;

    /// Fetch the full object and decode it as UTF-8
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be fetched or is not valid UTF-8.
    async fn get_content(&self, bucket: &str, key: &str) -> Result<String>;

    /// Write the full object, replacing any existing content
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn put_content(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()>;

    /// Short name of the backend, used in log fields
    fn backend_name(&self) -> &'static str;
}
