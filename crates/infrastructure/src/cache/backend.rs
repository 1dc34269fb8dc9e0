//! Raw cache backend abstraction and the moka implementation

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use thiserror::Error;

/// Errors a cache backend may raise
///
/// The [`ResultCache`](super::ResultCache) converts every one of these into
/// an absent/no-op result; they never reach the gateway's callers.
#[derive(Debug, Error)]
pub enum CacheBackendError {
    /// The operation did not complete within its deadline
    #[error("Cache operation timed out")]
    Timeout,

    /// The backend could not be reached
    #[error("Cache connection failed: {0}")]
    Connection(String),

    /// The backend answered with something unusable
    #[error("Cache protocol error: {0}")]
    Protocol(String),
}

/// Raw key/value store with TTL support
///
/// Values are raw bytes - callers handle serialization. Eviction policy
/// belongs to the backend; implementations are only expected to behave
/// like an LRU-ish cache with a soft item-count target.
#[async_trait]
pub trait CacheBackend: Send + Sync + std::fmt::Debug {
    /// Fetch a value, `None` if the key is absent or expired
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheBackendError>;

    /// Store a value with a time-to-live
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheBackendError>;

    /// Approximate number of stored entries, for statistics only
    fn entry_count(&self) -> u64 {
        0
    }
}

/// Moka-based in-process backend
///
/// Note: Moka 0.12 uses a cache-level TTL configured at build time. Per-entry
/// TTL requires the `Expiry` trait which adds complexity; entries use the
/// cache's configured TTL and the per-call `ttl` parameter is ignored.
pub struct MokaBackend {
    cache: Cache<String, Vec<u8>>,
}

impl std::fmt::Debug for MokaBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaBackend")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl MokaBackend {
    /// Create a backend with a capacity target and cache-level TTL
    #[must_use]
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(max_entries)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Run moka's pending maintenance tasks (test helper)
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

#[async_trait]
impl CacheBackend for MokaBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheBackendError> {
        Ok(self.cache.get(key).await)
    }

    async fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        _ttl: Duration,
    ) -> Result<(), CacheBackendError> {
        // Cache-level TTL applies; see type-level note
        self.cache.insert(key.to_string(), value).await;
        Ok(())
    }

    fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}
