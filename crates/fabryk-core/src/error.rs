//! Error types for fabryk-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for fabryk-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fabryk-core and the crates built on it
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A referenced item does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What kind of item was looked up (e.g. "node", "acl").
        kind: &'static str,
        /// Identifier that was not found.
        id: String,
    },

    /// Configuration is missing or malformed.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// A string could not be parsed into a typed value.
    #[error("Invalid {kind} '{value}': {reason}")]
    Parse {
        /// Type being parsed
        kind: &'static str,
        /// Raw input
        value: String,
        /// What went wrong
        reason: String,
    },

    /// I/O error tied to a specific file.
    #[error("I/O error at {}: {source}", path.display())]
    IoPath {
        /// File involved in the failed operation
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// I/O error without path context.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Creates a not-found error for an item of the given kind.
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Error::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse<V, R>(kind: &'static str, value: V, reason: R) -> Self
    where
        V: Into<String>,
        R: Into<String>,
    {
        Error::Parse {
            kind,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::IoPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
