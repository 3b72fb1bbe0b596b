//! Error types for fabryk-acl

use thiserror::Error;

use crate::model::AclId;

/// Result type alias for fabryk-acl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving readable authorities.
///
/// Resolution either fully succeeds or fails with one of these; a partial
/// authority list is never returned.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from fabryk-core
    #[error("Core error: {0}")]
    Core(#[from] fabryk_core::Error),

    /// A node or ACL identifier does not exist in the store.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// "node" or "acl"
        kind: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// The inheritance graph loops back on itself.
    #[error("Cyclic ACL chain: acl {acl_id} revisited after {}", format_path(.path))]
    CyclicAclChain {
        /// ACL that was reached a second time
        acl_id: AclId,
        /// ACLs visited before the repeat, leaf first
        path: Vec<AclId>,
    },

    /// The backing permission store failed.
    #[error("ACL store error: {message}")]
    Store {
        /// Backend-specific description
        message: String,
    },
}

fn format_path(path: &[AclId]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl Error {
    /// Creates a not-found error.
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Error::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Creates a store backend error.
    pub fn store<S: Into<String>>(message: S) -> Self {
        Error::Store {
            message: message.into(),
        }
    }

    /// Returns `true` when the requested node or ACL does not exist.
    ///
    /// In an indexing pipeline this usually means the node was deleted
    /// while being enumerated.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::Core(core) => core.is_not_found(),
            _ => false,
        }
    }

    /// Returns `true` for corrupted permission data.
    pub fn is_integrity_fault(&self) -> bool {
        matches!(self, Error::CyclicAclChain { .. })
    }

    /// Message safe to show outside the indexer.
    ///
    /// Never includes node or ACL identifiers.
    pub fn public_message(&self) -> &'static str {
        if self.is_not_found() {
            "not found"
        } else {
            "internal server error"
        }
    }
}
