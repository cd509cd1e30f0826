//! Domain models and types for the obfuscator.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Source descriptors** ([`SourceLocation`], [`ValidatedSource`])
//! - **Requests** ([`RedactionRequest`])
//! - **Tabular data** ([`Header`], [`TabularRecord`], [`RedactionResult`])
//! - **Error types** ([`ObfuscatorError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, ObfuscatorError>`]:
//!
//! ```rust
//! use gdpr_obfuscator::domain::{ObfuscatorError, Result, SourceLocation};
//!
//! fn example() -> Result<()> {
//!     let location: SourceLocation = "s3://bucket/data.csv".parse()?;
//!     assert!(location.is_object_store());
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod errors;
pub mod record;
pub mod request;
pub mod result;
pub mod source;

// Re-export commonly used types for convenience
pub use errors::ObfuscatorError;
pub use record::{Header, RedactionResult, TabularRecord, REDACTION_TOKEN};
pub use request::{RedactionRequest, FILE_TO_OBFUSCATE_KEY, PII_FIELDS_KEY};
pub use result::Result;
pub use source::{SourceLocation, ValidatedSource};
