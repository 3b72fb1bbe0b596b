//! Memoizing store wrapper.
//!
//! ACL records and their entries are immutable once created, so they are
//! cached by [`AclId`]. The node → ACL mapping changes whenever a node's
//! permissions are edited and is never cached.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::AclStore;
use crate::Result;
use crate::model::{AccessControlEntry, Acl, AclId, NodeRef};

/// Cache counters for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups delegated to the inner store.
    pub misses: u64,
    /// Cached ACL records.
    pub acls: usize,
    /// Cached entry lists.
    pub entry_lists: usize,
}

/// Caches `acl` and `entries` lookups of an inner store.
///
/// Each map holds at most `max_entries` items; once full, further results
/// are returned without being cached.
pub struct CachedAclStore<S: AclStore + ?Sized> {
    inner: Arc<S>,
    max_entries: usize,
    acls: RwLock<HashMap<AclId, Acl>>,
    entries: RwLock<HashMap<AclId, Vec<AccessControlEntry>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<S: AclStore + ?Sized> CachedAclStore<S> {
    /// Wrap `inner`, caching up to `max_entries` records per map.
    pub fn new(inner: Arc<S>, max_entries: usize) -> Self {
        Self {
            inner,
            max_entries,
            acls: RwLock::new(HashMap::new()),
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &Arc<S> {
        &self.inner
    }

    /// Current counters.
    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            acls: self.acls.read().await.len(),
            entry_lists: self.entries.read().await.len(),
        }
    }

    /// Drop every cached record.
    pub async fn clear(&self) {
        self.acls.write().await.clear();
        self.entries.write().await.clear();
    }

    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }
}

async fn remember<V: Clone>(map: &RwLock<HashMap<AclId, V>>, id: AclId, value: &V, limit: usize) {
    let mut map = map.write().await;
    if map.len() < limit || map.contains_key(&id) {
        map.insert(id, value.clone());
    }
}

#[async_trait]
impl<S: AclStore + ?Sized> AclStore for CachedAclStore<S> {
    async fn acl(&self, id: AclId) -> Result<Acl> {
        if let Some(acl) = self.acls.read().await.get(&id) {
            self.hit();
            return Ok(acl.clone());
        }
        self.miss();
        let acl = self.inner.acl(id).await?;
        remember(&self.acls, id, &acl, self.max_entries).await;
        Ok(acl)
    }

    async fn entries(&self, id: AclId) -> Result<Vec<AccessControlEntry>> {
        if let Some(entries) = self.entries.read().await.get(&id) {
            self.hit();
            return Ok(entries.clone());
        }
        self.miss();
        let entries = self.inner.entries(id).await?;
        remember(&self.entries, id, &entries, self.max_entries).await;
        Ok(entries)
    }

    async fn leaf_acl_id(&self, node: &NodeRef) -> Result<AclId> {
        self.inner.leaf_acl_id(node).await
    }

    fn name(&self) -> &str {
        "cached"
    }
}
