//! Error types for tree construction, decoding and filtering

use thiserror::Error;

use crate::kind::Kind;

/// Result type for tree operations
pub type Result<T> = std::result::Result<T, AstError>;

/// Errors that can occur while building, decoding or rewriting a tree
#[derive(Error, Debug)]
pub enum AstError {
    /// A node constructor received the wrong number of content values
    #[error("{kind} expects {expected} arguments, but {given} given")]
    Arity {
        kind: Kind,
        expected: usize,
        given: usize,
    },

    /// A node payload does not have the shape its kind requires
    #[error("Malformed {kind} payload: {reason}")]
    Shape { kind: Kind, reason: String },

    /// A node attribute carries a value outside the recognized set
    #[error("Unsupported value {value:?} for attribute {attribute:?}")]
    Config { attribute: String, value: String },

    /// The serialized tree could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while writing a serialized tree
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AstError {
    pub(crate) fn shape(kind: Kind, reason: impl Into<String>) -> Self {
        AstError::Shape {
            kind,
            reason: reason.into(),
        }
    }
}
