//! ACL data model.
//!
//! These types mirror the repository's permission tables: an [`Acl`] may
//! inherit from a parent ACL, and owns an ordered list of
//! [`AccessControlEntry`] grants and denials. Nodes are addressed by
//! [`NodeRef`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Permission that lets an authority view and manage a node's permissions.
///
/// It says nothing about reading content; counting it as a read grant would
/// leak catch-all groups such as `GROUP_EVERYONE` into every document.
pub const READ_PERMISSIONS: &str = "ReadPermissions";

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque ACL identifier. Immutable once assigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AclId(u64);

impl AclId {
    /// Wrap a raw database id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw database id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AclId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for AclId {
    type Err = fabryk_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| fabryk_core::Error::parse("acl id", s, e.to_string()))
    }
}

/// Repository node reference: `<protocol>://<store_id>/<uuid>`.
///
/// ```
/// use fabryk_acl::NodeRef;
///
/// let node: NodeRef = "workspace://SpacesStore/1a0b110f".parse().unwrap();
/// assert_eq!(node.protocol(), "workspace");
/// assert_eq!(node.store_id(), "SpacesStore");
/// assert_eq!(node.uuid(), "1a0b110f");
/// assert_eq!(node.to_string(), "workspace://SpacesStore/1a0b110f");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeRef {
    protocol: String,
    store_id: String,
    uuid: String,
}

impl NodeRef {
    /// Build a node reference from its parts.
    pub fn new(
        protocol: impl Into<String>,
        store_id: impl Into<String>,
        uuid: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            store_id: store_id.into(),
            uuid: uuid.into(),
        }
    }

    /// Store protocol, e.g. `workspace`.
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Store identifier, e.g. `SpacesStore`.
    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    /// Node uuid within the store.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}/{}", self.protocol, self.store_id, self.uuid)
    }
}

impl FromStr for NodeRef {
    type Err = fabryk_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| fabryk_core::Error::parse("node ref", s, reason);

        let (protocol, rest) = s.split_once("://").ok_or_else(|| invalid("missing '://'"))?;
        let (store_id, uuid) = rest
            .split_once('/')
            .ok_or_else(|| invalid("missing '/' between store id and uuid"))?;

        if protocol.is_empty() {
            return Err(invalid("empty protocol"));
        }
        if store_id.is_empty() {
            return Err(invalid("empty store id"));
        }
        if uuid.is_empty() || uuid.contains('/') {
            return Err(invalid("uuid must be a single non-empty segment"));
        }

        Ok(Self::new(protocol, store_id, uuid))
    }
}

impl TryFrom<String> for NodeRef {
    type Error = fabryk_core::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NodeRef> for String {
    fn from(node: NodeRef) -> Self {
        node.to_string()
    }
}

// ============================================================================
// ACL records
// ============================================================================

/// An access control list record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acl {
    /// Unique identifier.
    pub id: AclId,
    /// Parent ACL, absent for a root ACL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherits_from: Option<AclId>,
    /// When false the chain stops here even if `inherits_from` is set.
    #[serde(default = "default_inherits")]
    pub inherits: bool,
}

fn default_inherits() -> bool {
    true
}

impl Acl {
    /// A root ACL with no parent.
    pub fn root(id: u64) -> Self {
        Self {
            id: AclId(id),
            inherits_from: None,
            inherits: true,
        }
    }

    /// An ACL inheriting from `parent`.
    pub fn inheriting(id: u64, parent: u64) -> Self {
        Self {
            id: AclId(id),
            inherits_from: Some(AclId(parent)),
            inherits: true,
        }
    }

    /// Turn inheritance off while keeping the recorded parent.
    pub fn without_inheritance(mut self) -> Self {
        self.inherits = false;
        self
    }

    /// The ACL the chain continues to, if inheritance is in effect.
    pub fn parent(&self) -> Option<AclId> {
        if self.inherits { self.inherits_from } else { None }
    }
}

/// Whether an entry grants or denies its permission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessStatus {
    /// Permission granted.
    Allowed,
    /// Permission denied.
    Denied,
}

impl fmt::Display for AccessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allowed => write!(f, "ALLOWED"),
            Self::Denied => write!(f, "DENIED"),
        }
    }
}

/// A single grant or denial recorded against an ACL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlEntry {
    /// User or group identifier.
    pub authority: String,
    /// Permission being granted or denied.
    pub permission: String,
    /// Grant or denial.
    pub status: AccessStatus,
}

impl AccessControlEntry {
    /// An `ALLOWED` entry.
    pub fn allowed(authority: impl Into<String>, permission: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            permission: permission.into(),
            status: AccessStatus::Allowed,
        }
    }

    /// A `DENIED` entry.
    pub fn denied(authority: impl Into<String>, permission: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            permission: permission.into(),
            status: AccessStatus::Denied,
        }
    }

    /// Returns `true` for `ALLOWED` entries.
    pub fn is_allowed(&self) -> bool {
        self.status == AccessStatus::Allowed
    }
}
