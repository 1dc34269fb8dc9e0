//! Result cache configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Result cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether caching is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// TTL for cached geometry results in seconds (default: 5 minutes)
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Soft bound on the number of cached entries (default: 100)
    ///
    /// Eviction is delegated to the backing store; this is a capacity
    /// target, not a hard limit.
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,

    /// TTL for the startup connectivity-probe sentinel in seconds
    #[serde(default = "default_probe_ttl_secs")]
    pub probe_ttl_secs: u64,

    /// Bound on a single backend get/set operation in milliseconds
    #[serde(default = "default_op_timeout_ms")]
    pub op_timeout_ms: u64,
}

const fn default_ttl_secs() -> u64 {
    5 * 60 // 5 minutes
}

const fn default_max_entries() -> u64 {
    100
}

const fn default_probe_ttl_secs() -> u64 {
    10
}

const fn default_op_timeout_ms() -> u64 {
    2000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
            probe_ttl_secs: default_probe_ttl_secs(),
            op_timeout_ms: default_op_timeout_ms(),
        }
    }
}

impl CacheConfig {
    /// Get the result TTL as a Duration
    #[must_use]
    pub const fn ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.ttl_secs)
    }

    /// Get the probe sentinel TTL as a Duration
    #[must_use]
    pub const fn probe_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.probe_ttl_secs)
    }

    /// Get the per-operation timeout as a Duration
    #[must_use]
    pub const fn op_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.op_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn default_values_match_contract() {
        let config = CacheConfig::default();
        assert!(config.enabled);
        assert_eq!(config.ttl(), Duration::from_secs(300));
        assert_eq!(config.max_entries, 100);
        assert_eq!(config.probe_ttl(), Duration::from_secs(10));
    }
}
