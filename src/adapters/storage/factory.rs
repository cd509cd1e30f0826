//! Storage client factory
//!
//! This module provides the factory function that creates the object storage
//! client selected by configuration.

use crate::adapters::storage::memory::InMemoryStorage;
use crate::adapters::storage::s3::S3Storage;
use crate::adapters::storage::traits::ObjectStorage;
use crate::config::schema::{StorageBackend, StorageConfig};
use std::sync::Arc;

/// Create an object storage client based on the configuration
///
/// # Arguments
///
/// * `config` - Storage configuration
///
/// # Returns
///
/// Returns an Arc-wrapped trait object that implements [`ObjectStorage`]
pub fn create_storage(config: &StorageConfig) -> Arc<dyn ObjectStorage> {
    match config.backend {
        StorageBackend::S3 => {
            tracing::info!(
                region = config.region.as_deref().unwrap_or("<env>"),
                endpoint = config.endpoint.as_deref().unwrap_or("<default>"),
                "Creating S3 storage client"
            );
            Arc::new(S3Storage::new(config.clone()))
        }
        StorageBackend::Memory => {
            tracing::info!("Creating in-memory storage client");
            Arc::new(InMemoryStorage::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backend_is_s3() {
        let storage = create_storage(&StorageConfig::default());
        assert_eq!(storage.backend_name(), "s3");
    }

    #[test]
    fn test_memory_backend() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        };
        assert_eq!(create_storage(&config).backend_name(), "memory");
    }
}
