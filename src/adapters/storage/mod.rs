//! Object storage integration
//!
//! This module provides the [`ObjectStorage`] capability and its
//! implementations:
//!
//! - [`S3Storage`] - Amazon S3 and S3-compatible services
//! - [`InMemoryStorage`] - process-local map for tests and offline runs

pub mod factory;
pub mod memory;
pub mod s3;
pub mod traits;

pub use factory::create_storage;
pub use memory::InMemoryStorage;
pub use s3::S3Storage;
pub use traits::ObjectStorage;
