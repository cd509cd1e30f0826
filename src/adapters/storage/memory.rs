//! In-memory object storage
//!
//! Keeps objects in a map keyed by `(bucket, key)`. Used by tests and by the
//! `memory` storage backend for offline runs against local files.

use super::traits::ObjectStorage;
use crate::domain::{ObfuscatorError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type ObjectMap = HashMap<(String, String), Vec<u8>>;

/// Object storage backed by a process-local map
///
/// A panic while the map is locked cannot leave it half-updated, so a
/// poisoned lock is recovered rather than reported.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    objects: RwLock<ObjectMap>,
    get_calls: AtomicUsize,
}

impl InMemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, convenient for test fixtures
    pub fn with_object(self, bucket: &str, key: &str, body: impl Into<Vec<u8>>) -> Self {
        self.insert(bucket, key, body);
        self
    }

    /// Insert or replace an object
    pub fn insert(&self, bucket: &str, key: &str, body: impl Into<Vec<u8>>) {
        self.write_lock()
            .insert((bucket.to_string(), key.to_string()), body.into());
    }

    /// Raw bytes of an object, if present
    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.read_lock()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Number of objects held
    pub fn len(&self) -> usize {
        self.read_lock().len()
    }

    /// True when no objects are held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many times content has been fetched
    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, ObjectMap> {
        self.objects.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, ObjectMap> {
        self.objects.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ObjectStorage for InMemoryStorage {
    async fn head_exists(&self, bucket: &str, key: &str) -> Result<bool> {
        Ok(self
            .read_lock()
            .contains_key(&(bucket.to_string(), key.to_string())))
    }

    async fn get_content(&self, bucket: &str, key: &str) -> Result<String> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);

        let body = self.object(bucket, key).ok_or_else(|| {
            ObfuscatorError::Storage(format!("object not found: {bucket}/{key}"))
        })?;

        String::from_utf8(body).map_err(|e| {
            ObfuscatorError::Storage(format!("object {bucket}/{key} is not valid UTF-8: {e}"))
        })
    }

    async fn put_content(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        self.insert(bucket, key, body);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
