//! Error types for mesh-conversion

use std::path::PathBuf;

use mesh_api::Version;

/// Result type for mesh-conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while projecting, hydrating or loading baselines
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A value has the right shape but is not acceptable
    #[error("Invalid value at '{path}': {reason}")]
    InvalidValue { path: String, reason: String },

    /// The requested feature is not available in this version
    #[error("{feature} is not supported by control plane {version}")]
    UnsupportedFeature { feature: String, version: Version },

    /// No baseline is registered for the version
    #[error("No baseline available for control plane {version}")]
    BaselineNotFound { version: Version },

    /// Baseline catalog manifest not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Hydrating the projection did not give back the original spec
    #[error("Round trip mismatch for control plane {version}:\n{diff}")]
    RoundTripMismatch { version: Version, diff: String },

    // Transparent wrappers for underlying crate errors
    /// Settings tree error from mesh-values
    #[error(transparent)]
    Values(#[from] mesh_values::Error),

    /// Schema error from mesh-api
    #[error(transparent)]
    Api(#[from] mesh_api::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn invalid(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
