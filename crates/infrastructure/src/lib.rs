//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the moka-backed
//! result cache with availability tracking and the reqwest client for the
//! compute service. Also owns application configuration.

pub mod adapters;
pub mod cache;
pub mod config;

pub use adapters::ComputeAdapter;
pub use cache::{CacheBackend, CacheBackendError, MokaBackend, ResultCache};
pub use config::{AppConfig, CacheConfig, ServerConfig, UpstreamConfig};
