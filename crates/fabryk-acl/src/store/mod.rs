//! ACL store abstraction.
//!
//! The store is the read-only boundary to the repository's permission
//! tables. Lookups may block on external I/O, so the trait is async.
//!
//! # Backends
//!
//! - [`MemoryAclStore`]: in-memory graph, loadable from an [`AclFixture`]
//! - [`CachedAclStore`]: memoizing wrapper around any other store

mod cached;
mod memory;

pub use cached::{CacheStats, CachedAclStore};
pub use memory::{AclFixture, FixtureAcl, FixtureNode, MemoryAclStore};

use async_trait::async_trait;

use crate::Result;
use crate::model::{AccessControlEntry, Acl, AclId, NodeRef};

/// Read-only access to ACL records and node assignments.
///
/// Implementations return [`Error::NotFound`](crate::Error::NotFound) for
/// unknown identifiers and [`Error::Store`](crate::Error::Store) for
/// backend failures.
#[async_trait]
pub trait AclStore: Send + Sync {
    /// Fetch an ACL record by id.
    async fn acl(&self, id: AclId) -> Result<Acl>;

    /// Fetch the entries of an ACL in their stored order.
    async fn entries(&self, id: AclId) -> Result<Vec<AccessControlEntry>>;

    /// The ACL directly assigned to a node.
    async fn leaf_acl_id(&self, node: &NodeRef) -> Result<AclId>;

    /// Backend name for diagnostics.
    fn name(&self) -> &str;
}
