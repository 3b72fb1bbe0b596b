//! Readable-authority computation for nodes.
//!
//! [`ReadableAuthorityService`] is the entry point used by the index
//! document assembler: node → leaf ACL → chain → authorities.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use fabryk_acl::{
//!     AccessControlEntry, Acl, MemoryAclStore, NodeRef, ReadableAuthorityService,
//! };
//!
//! # tokio_test::block_on(async {
//! let node = NodeRef::new("workspace", "SpacesStore", "doc-1");
//! let store = MemoryAclStore::new()
//!     .with_acl(Acl::root(1), vec![AccessControlEntry::allowed("GROUP_EVERYONE", "Read")])
//!     .with_acl(Acl::inheriting(2, 1), vec![AccessControlEntry::allowed("USER_alice", "Read")])
//!     .with_node(node.clone(), 2);
//!
//! let service = ReadableAuthorityService::new(Arc::new(store));
//! let readable = service.compute(&node).await.unwrap();
//! assert_eq!(readable.as_slice(), ["GROUP_EVERYONE", "USER_alice"]);
//! # });
//! ```

use std::sync::Arc;

use futures::StreamExt;
use futures::stream;

use crate::Result;
use crate::chain::{ResolvedChain, resolve_chain};
use crate::config::AclConfig;
use crate::evaluator::{PermissionEvaluator, ReadableAuthorities};
use crate::model::NodeRef;
use crate::store::{AclStore, CachedAclStore};

/// Outcome of one node in a batch.
#[derive(Debug)]
pub struct NodeResolution {
    /// The node that was resolved.
    pub node: NodeRef,
    /// Its readable authorities, or why they could not be computed.
    pub result: Result<ReadableAuthorities>,
}

/// Computes which authorities may read a node.
///
/// Holds no per-request state, so one instance can serve concurrent
/// resolutions for different nodes.
pub struct ReadableAuthorityService<S: AclStore + ?Sized> {
    store: Arc<S>,
    evaluator: PermissionEvaluator,
    concurrency: usize,
}

impl<S: AclStore + ?Sized> ReadableAuthorityService<S> {
    /// Service over `store` with the default evaluator.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            evaluator: PermissionEvaluator::default(),
            concurrency: 1,
        }
    }

    /// Use a custom evaluator.
    pub fn with_evaluator(mut self, evaluator: PermissionEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Bound on concurrent resolutions in [`compute_many`](Self::compute_many).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The evaluator in use.
    pub fn evaluator(&self) -> &PermissionEvaluator {
        &self.evaluator
    }

    /// Resolve the ACL chain assigned to `node`, root first.
    pub async fn resolve_node_chain(&self, node: &NodeRef) -> Result<ResolvedChain> {
        let leaf = self.store.leaf_acl_id(node).await?;
        log::debug!("Node {node} has leaf acl {leaf}");
        resolve_chain(self.store.as_ref(), leaf).await
    }

    /// Authorities that can read `node`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`](crate::Error::NotFound) if the node has no ACL
    ///   or the chain references a missing ACL
    /// - [`Error::CyclicAclChain`](crate::Error::CyclicAclChain) on corrupted
    ///   inheritance
    pub async fn compute(&self, node: &NodeRef) -> Result<ReadableAuthorities> {
        let chain = self.resolve_node_chain(node).await?;
        let readable = self.evaluator.readable_authorities(&chain);
        log::debug!(
            "Node {node}: {} readable authorit(ies) across {} acl(s)",
            readable.len(),
            chain.len()
        );
        Ok(readable)
    }

    /// Resolve many nodes, keeping input order.
    ///
    /// Each node succeeds or fails on its own; a failure is reported in its
    /// [`NodeResolution`] and does not affect the others.
    pub async fn compute_many(&self, nodes: &[NodeRef]) -> Vec<NodeResolution> {
        stream::iter(nodes.iter().cloned())
            .map(|node| async move {
                let result = self.compute(&node).await;
                if let Err(e) = &result {
                    if e.is_not_found() {
                        log::warn!("Skipping node {node}: {e}");
                    } else {
                        log::warn!("Failed to resolve node {node}: {e}");
                    }
                }
                NodeResolution { node, result }
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }
}

impl ReadableAuthorityService<dyn AclStore> {
    /// Build a service from configuration.
    ///
    /// Wraps `store` in a [`CachedAclStore`] when caching is enabled.
    pub fn from_config(store: Arc<dyn AclStore>, config: &AclConfig) -> Self {
        let store: Arc<dyn AclStore> = if config.cache.enabled {
            log::debug!(
                "ACL cache enabled over '{}' (max {} entries)",
                store.name(),
                config.cache.max_entries
            );
            Arc::new(CachedAclStore::new(store, config.cache.max_entries))
        } else {
            store
        };

        Self::new(store)
            .with_evaluator(PermissionEvaluator::with_excluded(config.excluded()))
            .with_concurrency(config.batch.effective_concurrency())
    }
}
