//! Error types for rulelight

use std::fmt;
use std::io;

use thiserror::Error;

/// Result type alias for shell-level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Shell error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Message(String),
}

/// Record field a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Name,
    Color,
    Style,
    Pattern,
}

impl RecordField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::Name => "name",
            RecordField::Color => "color",
            RecordField::Style => "style",
            RecordField::Pattern => "pattern",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while loading a rule-definition document
///
/// `InvalidRecord` is recoverable: the record is skipped and reported in the
/// load report. Every other variant aborts the load and leaves the active
/// rule set untouched.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read rule source {source_name}: {error}")]
    SourceUnavailable {
        source_name: String,
        #[source]
        error: io::Error,
    },

    #[error("malformed rule document {source_name}: {reason}")]
    MalformedDocument { source_name: String, reason: String },

    #[error("rule #{index}: invalid {field} `{value}`: {reason}")]
    InvalidRecord {
        index: usize,
        field: RecordField,
        value: String,
        reason: String,
    },

    #[error("no valid rules produced from {source_name} ({rejected} rejected)")]
    EmptyResult { source_name: String, rejected: usize },
}

impl LoadError {
    /// Whether this error aborts a load (as opposed to skipping one record)
    pub fn is_fatal(&self) -> bool {
        !matches!(self, LoadError::InvalidRecord { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_record_message() {
        let err = LoadError::InvalidRecord {
            index: 3,
            field: RecordField::Color,
            value: "purple".to_string(),
            reason: "unknown color".to_string(),
        };
        assert_eq!(err.to_string(), "rule #3: invalid color `purple`: unknown color");
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_fatal_variants() {
        let err = LoadError::EmptyResult {
            source_name: "c.toml".to_string(),
            rejected: 2,
        };
        assert!(err.is_fatal());
        assert!(err.to_string().contains("c.toml"));

        let err = LoadError::SourceUnavailable {
            source_name: "missing.toml".to_string(),
            error: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.is_fatal());
    }

    #[test]
    fn test_load_error_into_shell_error() {
        let err: Error = LoadError::MalformedDocument {
            source_name: "x".to_string(),
            reason: "missing `rule` array".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "malformed rule document x: missing `rule` array");
    }
}
