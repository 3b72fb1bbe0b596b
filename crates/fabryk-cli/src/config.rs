//! Application configuration for the `fabryk` binary.

use fabryk_acl::AclConfig;
use fabryk_core::ConfigManager;
use serde::{Deserialize, Serialize};

/// Contents of `config.toml`.
///
/// ```toml
/// fixture = "/var/lib/fabryk/acls.json"
///
/// [log]
/// level = "info"
///
/// [acl]
/// excluded_permissions = ["ReadPermissions"]
///
/// [acl.cache]
/// enabled = true
/// max_entries = 10000
///
/// [acl.batch]
/// concurrency = 8
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FabrykConfig {
    /// Default ACL fixture file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture: Option<String>,
    /// Logging.
    pub log: LogConfig,
    /// Resolution settings.
    pub acl: AclConfig,
}

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ConfigManager for FabrykConfig {
    fn project_name() -> &'static str {
        "fabryk"
    }
}
