//! Cache port definition
//!
//! Defines the fail-soft cache interface used by the gateway. Implementations
//! absorb backend failures internally: `get` misses instead of erroring,
//! `set` is best-effort, and any backend error demotes the adapter's
//! availability state. Cache trouble must never fail a request.

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::{Fingerprint, GeoResult};
#[cfg(test)]
use mockall::automock;

/// Availability of the cache backend
///
/// Owned exclusively by the cache adapter; the orchestrator only reads it.
/// `Unknown` means the startup probe has not completed yet and is treated
/// as "worth trying".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAvailability {
    /// Startup probe has not run or not finished
    Unknown,
    /// Last backend operation (or probe) succeeded
    Available,
    /// A backend operation failed; the adapter bypasses itself from now on
    Unavailable,
}

impl CacheAvailability {
    /// Whether the gateway should bother consulting the cache
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

/// Cache port for storing and retrieving computed geometry results
///
/// Implementations must be thread-safe; availability reads may be stale
/// under concurrency (worst case is one extra upstream call).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeoCachePort: Send + Sync {
    /// Look up a cached result by fingerprint
    ///
    /// Returns `None` on miss, expiry, backend error, or when the adapter
    /// has marked itself unavailable.
    async fn get(&self, key: &Fingerprint) -> Option<GeoResult>;

    /// Store a result under a fingerprint, best-effort
    ///
    /// Backend errors are absorbed (logged and reflected in availability).
    async fn set(&self, key: &Fingerprint, value: &GeoResult, ttl: Duration);

    /// Probe backend connectivity with a short-lived sentinel key
    ///
    /// Returns `true` and marks the adapter available when the sentinel
    /// round-trips; otherwise marks it unavailable.
    async fn probe(&self) -> bool;

    /// Current availability state
    fn availability(&self) -> CacheAvailability;

    /// Get cache statistics (hits, misses, size)
    fn stats(&self) -> CacheStats;
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Current number of entries
    pub entries: u64,
}

impl CacheStats {
    /// Calculate the hit rate as a fraction (0.0 - 1.0)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            // Precision loss is acceptable for statistics display
            self.hits as f64 / total as f64
        }
    }
}

/// Standard TTL values for the gateway's cache entries
pub mod ttl {
    use std::time::Duration;

    /// TTL for computed geometry results (5 minutes)
    pub const RESULT: Duration = Duration::from_secs(5 * 60);

    /// TTL for the connectivity-probe sentinel key (10 seconds)
    pub const PROBE_SENTINEL: Duration = Duration::from_secs(10);
}
