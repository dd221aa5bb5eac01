//! Cache configuration.

use std::time::Duration;

use serde::Deserialize;

/// Cache behavior knobs, sourced from `rasteh.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Master switch; when off every lookup goes straight to the database and
    /// invalidation hooks become no-ops.
    pub enabled: bool,
    /// Optional entry lifetime in seconds. Unset means entries live until an
    /// invalidation event evicts them, which is the intended mode.
    pub default_ttl_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_ttl_secs: None,
        }
    }
}

impl CacheConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn entry_ttl(&self) -> Option<Duration> {
        self.default_ttl_secs.map(Duration::from_secs)
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            default_ttl_secs: settings.default_ttl_secs,
        }
    }
}
