//! # fabryk-acl
//!
//! Read-permission resolution for Fabryk search indexing.
//!
//! Every indexed document is tagged with the authorities (users and groups)
//! allowed to read it, so queries can be security-trimmed without going
//! back to the repository. This crate computes that list:
//!
//! 1. [`AclStore`] maps a node to its leaf ACL and serves ACL records
//! 2. [`resolve_chain`] walks inheritance to the root, returning the chain
//!    root first
//! 3. [`PermissionEvaluator`] collects the authorities holding an
//!    `ALLOWED` grant, skipping [`READ_PERMISSIONS`] entries
//!
//! [`ReadableAuthorityService`] composes the three.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod chain;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod service;
pub mod store;

#[cfg(test)]
mod proptests;

pub use chain::{ResolvedAcl, ResolvedChain, resolve_chain};
pub use config::{AclConfig, BatchConfig, CacheConfig};
pub use error::{Error, Result};
pub use evaluator::{ExcludedPermissions, PermissionEvaluator, ReadableAuthorities};
pub use model::{AccessControlEntry, AccessStatus, Acl, AclId, NodeRef, READ_PERMISSIONS};
pub use service::{NodeResolution, ReadableAuthorityService};
pub use store::{AclFixture, AclStore, CacheStats, CachedAclStore, MemoryAclStore};
