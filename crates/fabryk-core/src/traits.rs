//! Configuration management trait.
//!
//! [`ConfigManager`] gives every Fabryk application the same config file
//! conventions: a TOML file under the platform config directory, an
//! environment variable override, and flattening into environment
//! variables for container deployments.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// Loading, locating, and exporting an application's configuration.
pub trait ConfigManager: Default + Serialize + DeserializeOwned {
    /// Project name, used for the config directory and env var prefix.
    fn project_name() -> &'static str;

    /// Environment variable prefix derived from the project name.
    ///
    /// "fabryk-acl" → "FABRYK_ACL"
    fn env_prefix() -> String {
        Self::project_name().to_uppercase().replace(['-', ' '], "_")
    }

    /// `<config dir>/<project>/config.toml`, if the platform has a config dir.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::project_name()).join("config.toml"))
    }

    /// Resolve the config file path.
    ///
    /// Order: explicit path, then `<PREFIX>_CONFIG`, then the default path.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(format!("{}_CONFIG", Self::env_prefix())) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        Self::default_config_path()
    }

    /// Load the configuration, falling back to defaults when no file exists.
    fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                log::debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Load and parse a specific TOML file.
    fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Serialize to pretty TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten into `<PREFIX>_<SECTION>_<KEY>=value` pairs.
    fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_env(&Self::env_prefix(), &value, &mut vars);
        Ok(vars)
    }
}

fn flatten_env(prefix: &str, value: &toml::Value, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, child) in table {
                let name = format!("{prefix}_{}", key.to_uppercase().replace('-', "_"));
                flatten_env(&name, child, out);
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Array(items) => {
            let joined = items
                .iter()
                .map(|item| match item {
                    toml::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(",");
            out.push((prefix.to_string(), joined));
        }
        other => out.push((prefix.to_string(), other.to_string())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct TestConfig {
        name: String,
        limits: Limits,
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Limits {
        max: u32,
        tags: Vec<String>,
    }

    impl ConfigManager for TestConfig {
        fn project_name() -> &'static str {
            "fabryk-test"
        }
    }

    #[test]
    fn test_env_prefix() {
        assert_eq!(TestConfig::env_prefix(), "FABRYK_TEST");
    }

    #[test]
    fn test_resolve_explicit_path_wins() {
        let path = TestConfig::resolve_config_path(Some("/etc/fabryk/x.toml")).unwrap();
        assert_eq!(path, PathBuf::from("/etc/fabryk/x.toml"));
    }

    #[test]
    fn test_load_missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = TestConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config, TestConfig::default());
    }

    #[test]
    fn test_load_parses_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "name = \"idx\"\n[limits]\nmax = 3\n").unwrap();

        let config = TestConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.name, "idx");
        assert_eq!(config.limits.max, 3);
    }

    #[test]
    fn test_load_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "name = [unclosed").unwrap();

        let err = TestConfig::load(Some(path.to_str().unwrap())).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_to_env_vars_flattens_sections() {
        let config = TestConfig {
            name: "idx".to_string(),
            limits: Limits {
                max: 7,
                tags: vec!["a".to_string(), "b".to_string()],
            },
        };
        let vars = config.to_env_vars().unwrap();
        assert!(vars.contains(&("FABRYK_TEST_NAME".to_string(), "idx".to_string())));
        assert!(vars.contains(&("FABRYK_TEST_LIMITS_MAX".to_string(), "7".to_string())));
        assert!(vars.contains(&("FABRYK_TEST_LIMITS_TAGS".to_string(), "a,b".to_string())));
    }

    #[test]
    fn test_to_toml_string_roundtrips_through_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = TestConfig {
            name: "written".to_string(),
            ..Default::default()
        };
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();
        assert_eq!(TestConfig::load_from(&path).unwrap(), config);
    }
}
