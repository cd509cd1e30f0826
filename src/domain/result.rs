//! Result type alias for the obfuscator
//!
//! This module provides a convenient Result type alias that uses
//! [`ObfuscatorError`] as the error type.

use super::errors::ObfuscatorError;

/// Result type alias for obfuscator operations
///
/// # Examples
///
/// ```
/// use gdpr_obfuscator::domain::result::Result;
/// use gdpr_obfuscator::domain::errors::ObfuscatorError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ObfuscatorError::InvalidRequest("payload cannot be empty".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ObfuscatorError>;
