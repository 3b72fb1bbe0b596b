//! ACL inheritance chain resolution.
//!
//! Starting from a node's leaf ACL, the resolver follows `inherits_from`
//! while inheritance is switched on and returns every ACL on the way,
//! ordered root first and leaf last.
//!
//! The walk is iterative with a visited set, so deep chains never grow the
//! call stack and corrupted data with a cycle fails with
//! [`Error::CyclicAclChain`] instead of looping.

use std::collections::HashSet;

use serde::Serialize;

use crate::model::{AccessControlEntry, Acl, AclId};
use crate::store::AclStore;
use crate::{Error, Result};

/// An ACL together with its entries, as seen during one resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedAcl {
    /// The ACL record.
    #[serde(flatten)]
    pub acl: Acl,
    /// Its entries in stored order.
    pub entries: Vec<AccessControlEntry>,
}

impl ResolvedAcl {
    /// Pair an ACL with its entries.
    pub fn new(acl: Acl, entries: Vec<AccessControlEntry>) -> Self {
        Self { acl, entries }
    }
}

/// Root-first sequence of ACLs ending at the leaf that was resolved.
///
/// Request-scoped: built by [`resolve_chain`] and consumed by the
/// [`PermissionEvaluator`](crate::PermissionEvaluator).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedChain {
    links: Vec<ResolvedAcl>,
}

impl ResolvedChain {
    /// Build a chain from links already ordered root first.
    pub fn from_root_first(links: Vec<ResolvedAcl>) -> Self {
        Self { links }
    }

    /// The root ancestor.
    pub fn root(&self) -> Option<&ResolvedAcl> {
        self.links.first()
    }

    /// The ACL the resolution started from.
    pub fn leaf(&self) -> Option<&ResolvedAcl> {
        self.links.last()
    }

    /// Number of ACLs in the chain.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns `true` if the chain holds no ACLs.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// ACL ids, root first.
    pub fn ids(&self) -> Vec<AclId> {
        self.links.iter().map(|link| link.acl.id).collect()
    }

    /// Links, root first.
    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedAcl> {
        self.links.iter()
    }
}

impl<'a> IntoIterator for &'a ResolvedChain {
    type Item = &'a ResolvedAcl;
    type IntoIter = std::slice::Iter<'a, ResolvedAcl>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

/// Resolve the inheritance chain of `leaf`.
///
/// # Errors
///
/// - [`Error::NotFound`] if `leaf` or any ancestor is missing from the store
/// - [`Error::CyclicAclChain`] if an ACL is reached twice
pub async fn resolve_chain<S>(store: &S, leaf: AclId) -> Result<ResolvedChain>
where
    S: AclStore + ?Sized,
{
    let mut visited: HashSet<AclId> = HashSet::new();
    let mut walked: Vec<Acl> = Vec::new();
    let mut next = Some(leaf);

    while let Some(id) = next {
        if !visited.insert(id) {
            let path: Vec<AclId> = walked.iter().map(|acl| acl.id).collect();
            log::error!(
                "Cyclic ACL inheritance from leaf {leaf}: acl {id} revisited (path: {path:?})"
            );
            return Err(Error::CyclicAclChain { acl_id: id, path });
        }

        let acl = store.acl(id).await?;
        log::debug!(
            "acl {id}: inherits_from={:?} inherits={}",
            acl.inherits_from,
            acl.inherits
        );
        next = acl.parent();
        walked.push(acl);
    }

    walked.reverse();

    let mut links = Vec::with_capacity(walked.len());
    for acl in walked {
        let entries = store.entries(acl.id).await?;
        links.push(ResolvedAcl { acl, entries });
    }

    log::debug!("Resolved chain for acl {leaf}: {} link(s)", links.len());
    Ok(ResolvedChain { links })
}
