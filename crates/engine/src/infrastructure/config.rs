//! Engine configuration from environment variables.

use std::path::PathBuf;

use stowage_domain::{AuthorityContext, Delay, PrototypeCatalog};

const ENV_AUTHORITY: &str = "STOWAGE_AUTHORITY";
const ENV_CATALOG_PATH: &str = "STOWAGE_CATALOG_PATH";
const ENV_QUICK_PICKUP_COOLDOWN_MS: &str = "STOWAGE_QUICK_PICKUP_COOLDOWN_MS";

/// Cooldown applied to quick-pickup entities that do not set their own.
pub const DEFAULT_QUICK_PICKUP_COOLDOWN: Delay = Delay::from_millis(350);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {ENV_AUTHORITY} value '{0}': expected authoritative or predicted")]
    InvalidAuthority(String),
    #[error("Invalid {ENV_QUICK_PICKUP_COOLDOWN_MS} value '{value}': {source}")]
    InvalidCooldown {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read prototype catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid prototype catalog {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: stowage_domain::DomainError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub authority: AuthorityContext,
    /// Prototype catalog to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
    pub quick_pickup_cooldown: Delay,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            authority: AuthorityContext::Authoritative,
            catalog_path: None,
            quick_pickup_cooldown: DEFAULT_QUICK_PICKUP_COOLDOWN,
        }
    }
}

impl EngineConfig {
    /// Read configuration from the process environment.
    ///
    /// Uses `STOWAGE_AUTHORITY`, `STOWAGE_CATALOG_PATH`, and
    /// `STOWAGE_QUICK_PICKUP_COOLDOWN_MS`, falling back to defaults if not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_AUTHORITY) {
            config.authority = raw
                .parse()
                .map_err(|_| ConfigError::InvalidAuthority(raw.clone()))?;
        }

        config.catalog_path = lookup(ENV_CATALOG_PATH)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        if let Some(raw) = lookup(ENV_QUICK_PICKUP_COOLDOWN_MS) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|source| ConfigError::InvalidCooldown {
                    value: raw.clone(),
                    source,
                })?;
            config.quick_pickup_cooldown = Delay::from_millis(millis);
        }

        Ok(config)
    }

    /// Load the configured catalog, or parse `builtin` when none is configured.
    pub fn load_catalog(&self, builtin: &str) -> Result<PrototypeCatalog, CatalogError> {
        let (path, json) = match &self.catalog_path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
                    path: path.clone(),
                    source,
                })?;
                (path.clone(), json)
            }
            None => (PathBuf::from("<builtin>"), builtin.to_string()),
        };

        PrototypeCatalog::from_json(&json).map_err(|source| CatalogError::Invalid { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = EngineConfig::from_lookup(lookup(&[])).expect("valid");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.quick_pickup_cooldown, Delay::from_millis(350));
    }

    #[test]
    fn reads_every_setting() {
        let config = EngineConfig::from_lookup(lookup(&[
            (ENV_AUTHORITY, "predicted"),
            (ENV_CATALOG_PATH, "/tmp/catalog.json"),
            (ENV_QUICK_PICKUP_COOLDOWN_MS, "1000"),
        ]))
        .expect("valid");

        assert_eq!(config.authority, AuthorityContext::Predicted);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(config.quick_pickup_cooldown, Delay::from_millis(1000));
    }

    #[test]
    fn rejects_bad_values() {
        let err = EngineConfig::from_lookup(lookup(&[(ENV_AUTHORITY, "sideways")]))
            .expect_err("bad authority");
        assert!(matches!(err, ConfigError::InvalidAuthority(_)));

        let err = EngineConfig::from_lookup(lookup(&[(ENV_QUICK_PICKUP_COOLDOWN_MS, "soon")]))
            .expect_err("bad cooldown");
        assert!(matches!(err, ConfigError::InvalidCooldown { .. }));
    }

    #[test]
    fn builtin_catalog_is_used_without_a_path() {
        let config = EngineConfig::default();
        let catalog = config
            .load_catalog(r#"[{ "id": "Widget" }]"#)
            .expect("catalog loads");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn missing_catalog_file_is_a_read_error() {
        let config = EngineConfig {
            catalog_path: Some(PathBuf::from("/definitely/not/here.json")),
            ..EngineConfig::default()
        };
        let err = config.load_catalog("[]").expect_err("missing file");
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
