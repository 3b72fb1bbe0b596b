//! In-memory ACL store and fixture files.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::AclStore;
use crate::model::{AccessControlEntry, Acl, AclId, NodeRef};
use crate::{Error, Result};

// ============================================================================
// Fixture format
// ============================================================================

/// A complete ACL graph as stored in a JSON or TOML file.
///
/// ```json
/// {
///   "acls": [
///     { "id": 1, "entries": [
///       { "authority": "GROUP_EVERYONE", "permission": "Read", "status": "ALLOWED" }
///     ]},
///     { "id": 2, "inherits_from": 1 }
///   ],
///   "nodes": [
///     { "node_ref": "workspace://SpacesStore/abc", "acl_id": 2 }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AclFixture {
    /// ACL records with their entries.
    #[serde(default)]
    pub acls: Vec<FixtureAcl>,
    /// Node to leaf ACL assignments.
    #[serde(default)]
    pub nodes: Vec<FixtureNode>,
}

/// One ACL record in a fixture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixtureAcl {
    /// ACL id.
    pub id: AclId,
    /// Parent ACL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherits_from: Option<AclId>,
    /// Inheritance flag, defaults to true.
    #[serde(default = "default_true")]
    pub inherits: bool,
    /// Entries in stored order.
    #[serde(default)]
    pub entries: Vec<AccessControlEntry>,
}

/// One node assignment in a fixture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixtureNode {
    /// Node reference.
    pub node_ref: NodeRef,
    /// Directly assigned ACL.
    pub acl_id: AclId,
}

fn default_true() -> bool {
    true
}

impl AclFixture {
    /// Load a fixture, choosing TOML for `.toml` files and JSON otherwise.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| fabryk_core::Error::io_with_path(e, path))?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let fixture = if is_toml {
            Self::from_toml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };
        log::debug!(
            "Loaded ACL fixture {} ({} acls, {} nodes)",
            path.display(),
            fixture.acls.len(),
            fixture.nodes.len()
        );
        Ok(fixture)
    }

    /// Parse a JSON fixture.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::Core(e.into()))
    }

    /// Parse a TOML fixture.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Core(e.into()))
    }
}

// ============================================================================
// MemoryAclStore
// ============================================================================

#[derive(Debug, Default)]
struct MemoryState {
    acls: HashMap<AclId, Acl>,
    entries: HashMap<AclId, Vec<AccessControlEntry>>,
    nodes: HashMap<NodeRef, AclId>,
}

/// ACL store held entirely in memory.
///
/// Used by the CLI for fixture files and by tests. Mutators take `&self` so
/// a shared store can be edited while resolutions run against it.
#[derive(Debug, Default)]
pub struct MemoryAclStore {
    state: RwLock<MemoryState>,
}

impl MemoryAclStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a fixture.
    pub fn from_fixture(fixture: AclFixture) -> Self {
        let mut state = MemoryState::default();
        for item in fixture.acls {
            let acl = Acl {
                id: item.id,
                inherits_from: item.inherits_from,
                inherits: item.inherits,
            };
            state.entries.insert(acl.id, item.entries);
            state.acls.insert(acl.id, acl);
        }
        for node in fixture.nodes {
            state.nodes.insert(node.node_ref, node.acl_id);
        }
        Self {
            state: RwLock::new(state),
        }
    }

    /// Builder-style insert of an ACL with its entries.
    pub fn with_acl(mut self, acl: Acl, entries: Vec<AccessControlEntry>) -> Self {
        let state = self.state.get_mut();
        state.entries.insert(acl.id, entries);
        state.acls.insert(acl.id, acl);
        self
    }

    /// Builder-style node assignment.
    pub fn with_node(mut self, node: NodeRef, acl_id: u64) -> Self {
        self.state.get_mut().nodes.insert(node, AclId::new(acl_id));
        self
    }

    /// Insert or replace an ACL record, keeping existing entries.
    pub async fn insert_acl(&self, acl: Acl) {
        let mut state = self.state.write().await;
        state.entries.entry(acl.id).or_default();
        state.acls.insert(acl.id, acl);
    }

    /// Replace the entries of an ACL.
    pub async fn set_entries(&self, id: AclId, entries: Vec<AccessControlEntry>) {
        self.state.write().await.entries.insert(id, entries);
    }

    /// Assign (or reassign) a node's leaf ACL.
    pub async fn assign_node(&self, node: NodeRef, acl_id: AclId) {
        self.state.write().await.nodes.insert(node, acl_id);
    }

    /// Remove a node's ACL assignment.
    pub async fn unassign_node(&self, node: &NodeRef) -> Option<AclId> {
        self.state.write().await.nodes.remove(node)
    }

    /// Number of ACL records.
    pub async fn acl_count(&self) -> usize {
        self.state.read().await.acls.len()
    }
}

#[async_trait]
impl AclStore for MemoryAclStore {
    async fn acl(&self, id: AclId) -> Result<Acl> {
        self.state
            .read()
            .await
            .acls
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found("acl", id))
    }

    async fn entries(&self, id: AclId) -> Result<Vec<AccessControlEntry>> {
        let state = self.state.read().await;
        if !state.acls.contains_key(&id) {
            return Err(Error::not_found("acl", id));
        }
        Ok(state.entries.get(&id).cloned().unwrap_or_default())
    }

    async fn leaf_acl_id(&self, node: &NodeRef) -> Result<AclId> {
        self.state
            .read()
            .await
            .nodes
            .get(node)
            .copied()
            .ok_or_else(|| Error::not_found("node", node))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
