//! Effective read-permission evaluation.
//!
//! Walks every entry of a [`ResolvedChain`] root first and collects the
//! authorities holding an `ALLOWED` grant. Denials grant nothing; they are
//! skipped, not subtracted. Entries for an excluded permission are skipped
//! as well; [`READ_PERMISSIONS`] is always excluded.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::chain::ResolvedChain;
use crate::model::{AccessControlEntry, READ_PERMISSIONS};

// ============================================================================
// ReadableAuthorities
// ============================================================================

/// Distinct authorities in first-seen order.
///
/// Serializes as a plain list of strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ReadableAuthorities {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl ReadableAuthorities {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `authority` unless already present. Returns `true` if added.
    pub fn insert(&mut self, authority: &str) -> bool {
        if self.seen.contains(authority) {
            return false;
        }
        self.seen.insert(authority.to_string());
        self.ordered.push(authority.to_string());
        true
    }

    /// Returns `true` if `authority` is present.
    pub fn contains(&self, authority: &str) -> bool {
        self.seen.contains(authority)
    }

    /// Number of authorities.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns `true` if nothing is readable by anyone.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Authorities in first-seen order.
    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }

    /// Iterate in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.ordered.iter()
    }

    /// Consume into the ordered list.
    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

impl From<Vec<String>> for ReadableAuthorities {
    fn from(items: Vec<String>) -> Self {
        let mut set = Self::new();
        for item in &items {
            set.insert(item);
        }
        set
    }
}

impl From<ReadableAuthorities> for Vec<String> {
    fn from(set: ReadableAuthorities) -> Self {
        set.ordered
    }
}

impl<'a> IntoIterator for &'a ReadableAuthorities {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.iter()
    }
}

// ============================================================================
// ExcludedPermissions
// ============================================================================

/// Permission names that never confer read access.
///
/// [`READ_PERMISSIONS`] is always a member; extra names can only be added.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExcludedPermissions(BTreeSet<String>);

impl Default for ExcludedPermissions {
    fn default() -> Self {
        Self(BTreeSet::from([READ_PERMISSIONS.to_string()]))
    }
}

impl ExcludedPermissions {
    /// The reserved exclusion plus `names`.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut excluded = Self::default();
        excluded.0.extend(names.into_iter().map(Into::into));
        excluded
    }

    /// Add a permission name.
    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.0.insert(name.into());
        self
    }

    /// Returns `true` if `permission` is excluded.
    pub fn contains(&self, permission: &str) -> bool {
        self.0.contains(permission)
    }

    /// Excluded names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

// ============================================================================
// PermissionEvaluator
// ============================================================================

/// Turns a resolved chain into the authorities that can read the node.
#[derive(Clone, Debug, Default)]
pub struct PermissionEvaluator {
    excluded: ExcludedPermissions,
}

impl PermissionEvaluator {
    /// Evaluator with the default exclusion of [`READ_PERMISSIONS`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluator with extra exclusions on top of [`READ_PERMISSIONS`].
    pub fn with_excluded(excluded: ExcludedPermissions) -> Self {
        Self { excluded }
    }

    /// The exclusion set in use.
    pub fn excluded(&self) -> &ExcludedPermissions {
        &self.excluded
    }

    /// Whether a single entry confers read access.
    pub fn grants_read(&self, entry: &AccessControlEntry) -> bool {
        entry.is_allowed() && !self.excluded.contains(&entry.permission)
    }

    /// Authorities with an effective read grant anywhere in `chain`.
    ///
    /// Order is first-seen walking root to leaf, then entry order within
    /// each ACL.
    pub fn readable_authorities(&self, chain: &ResolvedChain) -> ReadableAuthorities {
        let mut readable = ReadableAuthorities::new();
        for link in chain {
            for entry in &link.entries {
                if self.grants_read(entry) {
                    readable.insert(&entry.authority);
                }
            }
        }
        readable
    }
}
