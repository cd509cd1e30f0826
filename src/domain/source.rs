//! Source descriptors
//!
//! A source descriptor is the raw `file_to_obfuscate` string. It names either a
//! local file or an object in S3 (`s3://bucket/key`). [`SourceLocation`] is the
//! parsed form; [`ValidatedSource`] is a location that passed the existence
//! checks of the request resolver.

use super::errors::ObfuscatorError;
use super::result::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// URI scheme recognised as object storage
pub const S3_SCHEME: &str = "s3";

/// Parsed source descriptor
///
/// # Examples
///
/// ```
/// use gdpr_obfuscator::domain::SourceLocation;
///
/// let location: SourceLocation = "s3://my-bucket/path/to/file.csv".parse().unwrap();
/// assert_eq!(
///     location,
///     SourceLocation::ObjectStore {
///         bucket: "my-bucket".to_string(),
///         key: "path/to/file.csv".to_string(),
///     }
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// File on the local filesystem
    Local(PathBuf),

    /// Object addressed by bucket and key
    ObjectStore {
        /// Bucket name
        bucket: String,
        /// Object key, without the leading slash
        key: String,
    },
}

impl SourceLocation {
    /// Parses a raw descriptor
    ///
    /// # Errors
    ///
    /// Returns [`ObfuscatorError::InvalidSourceUri`] when the descriptor has a
    /// `scheme://` prefix but either the scheme is not `s3` or the remainder
    /// cannot be split into a non-empty bucket and key.
    pub fn parse(raw: &str) -> Result<Self> {
        let Some((scheme, rest)) = split_scheme(raw) else {
            return Ok(SourceLocation::Local(PathBuf::from(raw)));
        };

        if !scheme.eq_ignore_ascii_case(S3_SCHEME) {
            return Err(ObfuscatorError::InvalidSourceUri(format!(
                "unsupported scheme '{scheme}' in '{raw}'"
            )));
        }

        match rest.split_once('/') {
            Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => {
                Ok(SourceLocation::ObjectStore {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                })
            }
            _ => Err(ObfuscatorError::InvalidSourceUri(format!(
                "'{raw}' must have the form s3://bucket/key"
            ))),
        }
    }

    /// Builds an object-storage location
    pub fn object(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        SourceLocation::ObjectStore {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Returns true for object-storage locations
    pub fn is_object_store(&self) -> bool {
        matches!(self, SourceLocation::ObjectStore { .. })
    }

    /// Returns the local path, if this is a local location
    pub fn as_local_path(&self) -> Option<&Path> {
        match self {
            SourceLocation::Local(path) => Some(path),
            SourceLocation::ObjectStore { .. } => None,
        }
    }
}

/// Splits `scheme://rest`, returning `None` when there is no scheme prefix
fn split_scheme(raw: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = raw.split_once("://")?;
    let is_scheme = scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    is_scheme.then_some((scheme, rest))
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Local(path) => write!(f, "{}", path.display()),
            SourceLocation::ObjectStore { bucket, key } => {
                write!(f, "{S3_SCHEME}://{bucket}/{key}")
            }
        }
    }
}

impl FromStr for SourceLocation {
    type Err = ObfuscatorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A source that passed the existence and non-emptiness checks
///
/// Only the request resolver builds these. The guarantee is point-in-time:
/// the source may still disappear before it is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSource {
    raw: String,
    location: SourceLocation,
}

impl ValidatedSource {
    pub(crate) fn new(raw: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            raw: raw.into(),
            location,
        }
    }

    /// The descriptor exactly as it appeared in the request
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed location
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }
}

impl fmt::Display for ValidatedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_s3_uri() {
        let location = SourceLocation::parse("s3://my-bucket/my-folder/my-file.csv").unwrap();
        assert_eq!(location, SourceLocation::object("my-bucket", "my-folder/my-file.csv"));
        assert!(location.is_object_store());
        assert_eq!(location.to_string(), "s3://my-bucket/my-folder/my-file.csv");
    }

    #[test]
    fn test_parse_local_path() {
        let location = SourceLocation::parse("data/customers.csv").unwrap();
        assert_eq!(
            location.as_local_path(),
            Some(Path::new("data/customers.csv"))
        );
        assert!(!location.is_object_store());
    }

    #[test]
    fn test_windows_drive_path_is_local() {
        let location = SourceLocation::parse(r"C:\data\customers.csv").unwrap();
        assert!(location.as_local_path().is_some());
    }

    #[test_case("s3://bucket" ; "no key")]
    #[test_case("s3://bucket/" ; "empty key")]
    #[test_case("s3:///key.csv" ; "empty bucket")]
    #[test_case("s3://" ; "nothing after scheme")]
    fn test_parse_invalid_s3_uri(raw: &str) {
        let err = SourceLocation::parse(raw).unwrap_err();
        assert!(matches!(err, ObfuscatorError::InvalidSourceUri(_)));
    }

    #[test]
    fn test_parse_unsupported_scheme() {
        let err = SourceLocation::parse("gs://bucket/key.csv").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'gs'"));
    }

    #[test]
    fn test_validated_source_keeps_literal() {
        let source = ValidatedSource::new("s3://b/k.csv", SourceLocation::object("b", "k.csv"));
        assert_eq!(source.as_str(), "s3://b/k.csv");
        assert_eq!(source.to_string(), "s3://b/k.csv");
    }
}
