//! Error types for mesh-values

use crate::value::Kind;

/// Result type for mesh-values operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or building a settings tree
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A node exists at the path but has the wrong kind
    #[error("Type mismatch at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: Kind,
        found: Kind,
    },

    /// The path cannot address a node (empty, or rooted at a scalar)
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// A number that is not representable as a 64-bit signed integer
    #[error("Unsupported number at '{path}': {value}")]
    UnsupportedNumber { path: String, value: String },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn mismatch(path: impl Into<String>, expected: Kind, found: Kind) -> Self {
        Self::TypeMismatch {
            path: path.into(),
            expected,
            found,
        }
    }
}
