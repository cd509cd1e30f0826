//! Core business logic for the obfuscator.
//!
//! # Modules
//!
//! - [`resolver`] - Request parsing and source validation
//! - [`masking`] - CSV parsing, field redaction and re-serialization
//! - [`obfuscator`] - The two composed, as used by the CLI and event handler
//!
//! # Workflow
//!
//! 1. **Resolve**: Parse the JSON payload and confirm the source exists and
//!    is non-empty
//! 2. **Read**: Fetch the full content from S3 or the local filesystem
//! 3. **Mask**: Replace every sensitive field value with `***`
//! 4. **Serialize**: Write header and rows back out in their original order
//!
//! Persisting the result is left to the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use gdpr_obfuscator::adapters::storage::create_storage;
//! use gdpr_obfuscator::config::StorageConfig;
//! use gdpr_obfuscator::core::Obfuscator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let obfuscator = Obfuscator::new(create_storage(&StorageConfig::default()));
//! let result = obfuscator
//!     .obfuscate(r#"{"file_to_obfuscate": "s3://bucket/new_data/file1.csv", "pii_fields": ["name"]}"#)
//!     .await?;
//! println!("{}", result.as_str());
//! # Ok(())
//! # }
//! ```

pub mod masking;
pub mod obfuscator;
pub mod resolver;

pub use masking::{mask_csv, FieldMaskingEngine};
pub use obfuscator::Obfuscator;
pub use resolver::{parse_payload, RequestPayload, RequestResolver};
