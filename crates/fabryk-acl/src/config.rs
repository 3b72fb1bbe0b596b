//! Resolver configuration.

use serde::{Deserialize, Serialize};

use crate::evaluator::ExcludedPermissions;
use crate::model::READ_PERMISSIONS;

/// Settings for readable-authority resolution.
///
/// Lives under the `[acl]` table of the application config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclConfig {
    /// Permissions that never confer read access, in addition to
    /// `ReadPermissions`, which is always excluded.
    pub excluded_permissions: Vec<String>,
    /// ACL lookup cache.
    pub cache: CacheConfig,
    /// Batch resolution.
    pub batch: BatchConfig,
}

impl Default for AclConfig {
    fn default() -> Self {
        Self {
            excluded_permissions: vec![READ_PERMISSIONS.to_string()],
            cache: CacheConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl AclConfig {
    /// The configured exclusion set, always including `ReadPermissions`.
    pub fn excluded(&self) -> ExcludedPermissions {
        ExcludedPermissions::from_names(self.excluded_permissions.iter().cloned())
    }
}

/// ACL lookup cache settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Wrap the store in a [`CachedAclStore`](crate::CachedAclStore).
    pub enabled: bool,
    /// Upper bound on cached records per map.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 10_000,
        }
    }
}

/// Batch resolution settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Resolutions in flight at once.
    pub concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { concurrency: 8 }
    }
}

impl BatchConfig {
    /// Concurrency, never below one.
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}
