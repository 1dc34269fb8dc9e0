//! Gateway orchestration service
//!
//! Implements the read-through caching protocol in front of the compute
//! service: fingerprint the request, check the cache, call upstream on a
//! miss, write the result back best-effort.

use std::sync::Arc;
use std::time::Duration;

use domain::value_objects::{Fingerprint, GeoPoint, GeoResult};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{GeoCachePort, ttl};

/// Orchestrates fingerprinting, cache lookup, and the upstream call
///
/// Concurrent requests for the same fingerprint are not coalesced: two
/// simultaneous misses both call upstream and both write the same key
/// (last write wins). Upstream calls are idempotent and cache writes are
/// idempotent overwrites, so this costs throughput, not correctness.
pub struct GatewayService {
    cache: Arc<dyn GeoCachePort>,
    compute: Arc<dyn crate::ports::ComputePort>,
    result_ttl: Duration,
}

impl std::fmt::Debug for GatewayService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayService")
            .field("cache", &"<GeoCachePort>")
            .field("compute", &"<ComputePort>")
            .field("result_ttl", &self.result_ttl)
            .finish()
    }
}

impl GatewayService {
    /// Create a gateway with the default result TTL
    pub fn new(cache: Arc<dyn GeoCachePort>, compute: Arc<dyn crate::ports::ComputePort>) -> Self {
        Self::with_result_ttl(cache, compute, ttl::RESULT)
    }

    /// Create a gateway with a custom result TTL
    pub fn with_result_ttl(
        cache: Arc<dyn GeoCachePort>,
        compute: Arc<dyn crate::ports::ComputePort>,
        result_ttl: Duration,
    ) -> Self {
        Self {
            cache,
            compute,
            result_ttl,
        }
    }

    /// Process a point set through the cache, falling back to upstream
    ///
    /// Cache trouble never surfaces: an unavailable or failing backend turns
    /// the request into a plain upstream call. Upstream failures propagate
    /// unchanged and are never cached.
    #[instrument(skip(self, points), fields(points = points.len(), cached = tracing::field::Empty))]
    pub async fn process(&self, points: &[GeoPoint]) -> Result<GeoResult, ApplicationError> {
        let key = Fingerprint::from_points(points);

        if self.cache.availability().is_usable() {
            if let Some(cached) = self.cache.get(&key).await {
                tracing::Span::current().record("cached", true);
                info!(key = %key, "Returning cached geometry result");
                return Ok(cached);
            }
        } else {
            debug!(key = %key, "Cache unavailable, skipping lookup");
        }

        tracing::Span::current().record("cached", false);

        let result = match self.compute.compute(points).await {
            Ok(result) => result,
            Err(e) => {
                warn!(key = %key, error = %e, "Compute service call failed");
                return Err(e);
            },
        };

        // Best-effort write-back; the adapter absorbs backend errors
        if self.cache.availability().is_usable() {
            debug!(key = %key, ttl_secs = self.result_ttl.as_secs(), "Caching geometry result");
            self.cache.set(&key, &result, self.result_ttl).await;
        }

        Ok(result)
    }

    /// Availability snapshot and counters of the underlying cache
    #[must_use]
    pub fn cache_stats(&self) -> crate::ports::CacheStats {
        self.cache.stats()
    }

    /// Whether the cache backend is currently considered usable
    #[must_use]
    pub fn cache_usable(&self) -> bool {
        self.cache.availability().is_usable()
    }
}
