//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `server`: HTTP server settings
//! - `cache`: result cache TTL and capacity
//! - `upstream`: compute service endpoint

mod cache;
mod server;
mod upstream;

use serde::{Deserialize, Serialize};

pub use cache::CacheConfig;
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Result cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Compute service configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Layering: defaults, then an optional `config.toml`, then `GEOGATE_*`
    /// environment variables (e.g. `GEOGATE_SERVER_PORT`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("GEOGATE")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate settings that have no sane default
    ///
    /// # Errors
    ///
    /// Returns an error when the upstream base URL is missing.
    pub fn validate(&self) -> Result<(), String> {
        if self.upstream.base_url.trim().is_empty() {
            return Err("upstream.base_url is required (set it in config.toml)".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fails_validation_without_upstream() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_with_upstream_validates() {
        let config = AppConfig {
            upstream: UpstreamConfig {
                base_url: "http://compute:8000".to_string(),
                ..UpstreamConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserializes_from_toml_fragment() {
        let toml = r#"
            [server]
            port = 3001

            [cache]
            ttl_secs = 60
            max_entries = 10

            [upstream]
            base_url = "http://localhost:8000"
        "#;
        let config: AppConfig = toml::from_str(toml).expect("parse");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.cache.max_entries, 10);
        assert_eq!(config.upstream.base_url, "http://localhost:8000");
    }
}
