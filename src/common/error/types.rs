//! Unified error types for olefield.
//!
//! Every data error names the record it was raised in (`context`) so a failure
//! can be diagnosed without re-parsing the input.
use thiserror::Error;

/// Main error type for olefield operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Fewer bytes remain than a fixed-width read requires
    #[error("{context}: truncated input, need {expected} bytes but only {available} available")]
    Truncated {
        context: String,
        expected: usize,
        available: usize,
    },

    /// A structural invariant of the format is violated
    #[error("{context}: bad data: {detail}")]
    BadData { context: String, detail: String },

    /// A known variant of the format that is not handled
    #[error("{context}: unsupported {field} value {value}")]
    Unsupported {
        context: String,
        field: String,
        value: String,
    },

    /// Malformed field spec
    #[error("Field spec error: {0}")]
    Spec(#[from] SpecError),
}

impl Error {
    pub(crate) fn truncated(context: &str, expected: usize, available: usize) -> Self {
        Error::Truncated {
            context: context.to_string(),
            expected,
            available,
        }
    }

    pub(crate) fn bad_data(context: &str, detail: impl Into<String>) -> Self {
        Error::BadData {
            context: context.to_string(),
            detail: detail.into(),
        }
    }

    /// Whether the input may be valid in a broader dialect of the format.
    ///
    /// Callers can use this to skip a record instead of giving up on the
    /// whole field.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported { .. })
    }
}

/// Errors in a field spec, or in how a decoded record is queried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// A spec line does not follow `TYPE NAME [==LITERAL SEVERITY]`
    #[error("line {line}: {reason}: {text:?}")]
    Syntax {
        line: usize,
        text: String,
        reason: &'static str,
    },

    /// The same field name appears twice in one spec
    #[error("duplicate field `{0}`")]
    DuplicateField(String),

    /// A record lookup for a field the spec does not declare
    #[error("no field `{0}` in record")]
    MissingField(String),

    /// A record lookup with the wrong value kind
    #[error("field `{field}` is not {expected}")]
    KindMismatch {
        field: String,
        expected: &'static str,
    },
}

/// Result type for olefield operations.
pub type Result<T> = std::result::Result<T, Error>;
