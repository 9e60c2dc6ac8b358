//! Configuration for the access control engine
//!
//! All configuration is static, hand-authored data: cache tuning and the
//! navigation menu tree. Loadable from YAML, with per-field serde defaults
//! so partial files stay valid.

use crate::acl::navigation::NavigationNode;
use crate::utils::error::{AclError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Decision cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enable the decision cache
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Soft cap on stored entries; expired entries are purged when reached
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Entry time-to-live in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            max_entries: default_max_entries(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl CacheConfig {
    /// Entry time-to-live.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

fn default_cache_enabled() -> bool {
    true
}

fn default_max_entries() -> usize {
    1024
}

fn default_ttl_secs() -> u64 {
    300 // 5 minutes
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AclConfig {
    /// Decision cache tuning
    #[serde(default)]
    pub cache: CacheConfig,
    /// Navigation menu tree; empty means use the built-in default menu
    #[serde(default)]
    pub navigation: Vec<NavigationNode>,
}

impl AclConfig {
    /// Parse configuration from a YAML document and validate it.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading access control configuration");
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.cache.max_entries == 0 {
            return Err(AclError::validation("cache.max_entries must be greater than 0"));
        }
        if self.cache.ttl_secs == 0 {
            return Err(AclError::validation("cache.ttl_secs must be greater than 0"));
        }
        validate_navigation(&self.navigation)
    }

    /// Merge another configuration over this one. Fields that differ from
    /// their defaults in `other` win.
    pub fn merge(mut self, other: Self) -> Self {
        let defaults = CacheConfig::default();
        if other.cache.enabled != defaults.enabled {
            self.cache.enabled = other.cache.enabled;
        }
        if other.cache.max_entries != defaults.max_entries {
            self.cache.max_entries = other.cache.max_entries;
        }
        if other.cache.ttl_secs != defaults.ttl_secs {
            self.cache.ttl_secs = other.cache.ttl_secs;
        }
        if !other.navigation.is_empty() {
            self.navigation = other.navigation;
        }
        self
    }
}

fn validate_navigation(nodes: &[NavigationNode]) -> Result<()> {
    for node in nodes {
        if node.title.is_empty() {
            return Err(AclError::validation("navigation node title cannot be empty"));
        }
        if node.route.is_empty() {
            return Err(AclError::validation(format!(
                "navigation node '{}' has an empty route",
                node.title
            )));
        }
        if let Some(children) = &node.children {
            validate_navigation(children)?;
        }
    }
    Ok(())
}
