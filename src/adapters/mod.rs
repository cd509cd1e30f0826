//! External system integrations for the obfuscator.
//!
//! - [`storage`] - Object storage abstraction (trait-based) with S3 and
//!   in-memory implementations
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with in-memory implementations. The resolver, the masking
//! engine and the event handler receive an `Arc<dyn ObjectStorage>` and never
//! construct a client themselves.
//!
//! ```rust,no_run
//! use gdpr_obfuscator::adapters::storage::{create_storage, ObjectStorage};
//! use gdpr_obfuscator::config::StorageConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = create_storage(&StorageConfig::default());
//! let exists = storage.head_exists("my-bucket", "data/customers.csv").await?;
//! # Ok(())
//! # }
//! ```

pub mod storage;
