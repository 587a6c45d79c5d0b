//! Error types for mesh-api

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported control plane version: '{version}'")]
    UnsupportedVersion { version: String },
}
