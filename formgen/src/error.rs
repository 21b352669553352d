//! Error types for form rendering.
//!
//! Every renderer is total over well-formed input and fails loudly otherwise:
//! there is no partial tree and no retry. A failed render pass surfaces one of
//! the errors below to the caller.

use thiserror::Error;

/// Result type alias for rendering operations.
pub type FormResult<T> = Result<T, FormError>;

/// Main error type for rendering operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The field kind has no renderer.
    #[error("{kind} fields are not supported")]
    NotSupported { kind: &'static str },

    /// The schema (or the value rendered against it) is malformed.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A list operation referenced a row that does not exist.
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Errors detected while walking a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A wrapper or reference chain unwrapped to a node it had already visited.
    #[error("Cyclic wrapper chain: {}", .chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    /// A reference names a definition that does not exist.
    #[error("Unknown schema reference '{name}'")]
    UnknownReference { name: String },

    /// A factory was requested for a schema of the wrong kind.
    #[error("Field '{path}' expected a {expected} schema, found {found}")]
    Mismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The current value does not have the shape the schema describes.
    #[error("Field '{path}' expected a {expected} value")]
    UnexpectedValue { path: String, expected: &'static str },

    /// A recursive schema nested deeper than the configured limit.
    #[error("Field '{path}' exceeds the nesting limit of {limit}")]
    TooDeep { path: String, limit: usize },
}

/// An out-of-range row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Index {index} is out of bounds for a list of length {len}")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

impl FormError {
    /// Create a not supported error for the given field kind.
    pub fn not_supported(kind: &'static str) -> Self {
        Self::NotSupported { kind }
    }
}

impl SchemaError {
    /// Create a mismatch error.
    pub fn mismatch(path: impl ToString, expected: &'static str, found: &'static str) -> Self {
        Self::Mismatch {
            path: path.to_string(),
            expected,
            found,
        }
    }

    /// Create an unexpected value error.
    pub fn unexpected_value(path: impl ToString, expected: &'static str) -> Self {
        Self::UnexpectedValue {
            path: path.to_string(),
            expected,
        }
    }
}
