//! Error types for fabryk-cli

use thiserror::Error;

/// Result type alias for fabryk-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fabryk-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from fabryk-core
    #[error("Core error: {0}")]
    Core(#[from] fabryk_core::Error),

    /// Error from fabryk-acl
    #[error("ACL error: {0}")]
    Acl(#[from] fabryk_acl::Error),

    /// Failed to write command output
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// Failed to encode command output
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}
