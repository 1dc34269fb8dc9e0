//! Fail-soft result cache with availability tracking
//!
//! Implements `GeoCachePort` over a [`CacheBackend`]. Every backend call is
//! bounded by a timeout; any error or timeout demotes the availability state
//! to `Unavailable` and the adapter short-circuits for the rest of the
//! process lifetime. It is never proactively retried.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::time::Duration;

use application::ports::{CacheAvailability, CacheStats, GeoCachePort};
use async_trait::async_trait;
use domain::value_objects::{Fingerprint, GeoResult};
use tracing::{debug, instrument, warn};

use super::backend::{CacheBackend, CacheBackendError};
use crate::config::CacheConfig;

/// Sentinel key for connectivity probes; deliberately outside the `geo:`
/// result namespace
const PROBE_KEY: &str = "probe:connectivity";
const PROBE_VALUE: &[u8] = b"connected";

const AVAILABILITY_UNKNOWN: u8 = 0;
const AVAILABILITY_AVAILABLE: u8 = 1;
const AVAILABILITY_UNAVAILABLE: u8 = 2;

/// Fail-soft cache adapter for computed geometry results
pub struct ResultCache {
    backend: Arc<dyn CacheBackend>,
    availability: AtomicU8,
    op_timeout: Duration,
    probe_ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("availability", &self.availability_state())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl ResultCache {
    /// Create a result cache over a backend
    ///
    /// With `cache.enabled = false` the adapter starts `Unavailable` and
    /// every operation is a silent bypass.
    pub fn new(backend: Arc<dyn CacheBackend>, config: &CacheConfig) -> Self {
        let initial = if config.enabled {
            AVAILABILITY_UNKNOWN
        } else {
            AVAILABILITY_UNAVAILABLE
        };
        Self {
            backend,
            availability: AtomicU8::new(initial),
            op_timeout: config.op_timeout(),
            probe_ttl: config.probe_ttl(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn availability_state(&self) -> CacheAvailability {
        match self.availability.load(Ordering::Relaxed) {
            AVAILABILITY_AVAILABLE => CacheAvailability::Available,
            AVAILABILITY_UNAVAILABLE => CacheAvailability::Unavailable,
            _ => CacheAvailability::Unknown,
        }
    }

    fn mark_available(&self) {
        self.availability
            .store(AVAILABILITY_AVAILABLE, Ordering::Relaxed);
    }

    fn mark_unavailable(&self, reason: &str) {
        let previous = self
            .availability
            .swap(AVAILABILITY_UNAVAILABLE, Ordering::Relaxed);
        if previous != AVAILABILITY_UNAVAILABLE {
            warn!(reason, "Cache backend degraded, bypassing cache from now on");
        }
    }

    /// Run a backend operation under the configured deadline
    async fn bounded<T>(
        &self,
        op: impl Future<Output = Result<T, CacheBackendError>>,
    ) -> Result<T, CacheBackendError> {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(result) => result,
            Err(_) => Err(CacheBackendError::Timeout),
        }
    }
}

#[async_trait]
impl GeoCachePort for ResultCache {
    #[instrument(skip(self), fields(key = %key), level = "debug")]
    async fn get(&self, key: &Fingerprint) -> Option<GeoResult> {
        if !self.availability_state().is_usable() {
            return None;
        }

        let bytes = match self.bounded(self.backend.get(key.as_str())).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!("Cache miss");
                return None;
            },
            Err(e) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                self.mark_unavailable(&e.to_string());
                return None;
            },
        };

        match serde_json::from_slice::<GeoResult>(&bytes) {
            Ok(result) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit");
                Some(result)
            },
            Err(e) => {
                // A corrupt entry is a miss, not an outage
                self.misses.fetch_add(1, Ordering::Relaxed);
                warn!(error = %e, "Discarding undecodable cache entry");
                None
            },
        }
    }

    #[instrument(skip(self, value), fields(key = %key), level = "debug")]
    async fn set(&self, key: &Fingerprint, value: &GeoResult, ttl: Duration) {
        if !self.availability_state().is_usable() {
            return;
        }

        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Failed to encode result for caching");
                return;
            },
        };

        match self.bounded(self.backend.set(key.as_str(), bytes, ttl)).await {
            Ok(()) => debug!(ttl_secs = ttl.as_secs(), "Cache set"),
            Err(e) => self.mark_unavailable(&e.to_string()),
        }
    }

    #[instrument(skip(self))]
    async fn probe(&self) -> bool {
        let write = self
            .bounded(
                self.backend
                    .set(PROBE_KEY, PROBE_VALUE.to_vec(), self.probe_ttl),
            )
            .await;

        let ok = match write {
            Ok(()) => matches!(
                self.bounded(self.backend.get(PROBE_KEY)).await,
                Ok(Some(bytes)) if bytes == PROBE_VALUE
            ),
            Err(_) => false,
        };

        if ok {
            self.mark_available();
            debug!("Cache connectivity probe succeeded");
        } else {
            self.mark_unavailable("connectivity probe failed");
        }
        ok
    }

    fn availability(&self) -> CacheAvailability {
        self.availability_state()
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.backend.entry_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MokaBackend;
    use domain::value_objects::{BoundingBox, Centroid, GeoPoint};

    fn sample_result() -> GeoResult {
        GeoResult {
            centroid: Centroid { lat: 20.0, lng: 30.0 },
            bounds: BoundingBox {
                north: 30.0,
                south: 10.0,
                east: 40.0,
                west: 20.0,
            },
        }
    }

    fn sample_key() -> Fingerprint {
        Fingerprint::from_points(&[GeoPoint::new_unchecked(10.0, 20.0)])
    }

    fn moka_cache() -> ResultCache {
        let config = CacheConfig::default();
        let backend = Arc::new(MokaBackend::new(config.max_entries, config.ttl()));
        ResultCache::new(backend, &config)
    }

    /// Backend that fails every call
    #[derive(Debug)]
    struct FailingBackend;

    #[async_trait]
    impl CacheBackend for FailingBackend {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheBackendError> {
            Err(CacheBackendError::Connection("refused".to_string()))
        }

        async fn set(
            &self,
            _key: &str,
            _value: Vec<u8>,
            _ttl: Duration,
        ) -> Result<(), CacheBackendError> {
            Err(CacheBackendError::Connection("refused".to_string()))
        }
    }

    /// Backend that never completes, to exercise the operation deadline
    #[derive(Debug)]
    struct HangingBackend;

    #[async_trait]
    impl CacheBackend for HangingBackend {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheBackendError> {
            std::future::pending().await
        }

        async fn set(
            &self,
            _key: &str,
            _value: Vec<u8>,
            _ttl: Duration,
        ) -> Result<(), CacheBackendError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let cache = moka_cache();
        let key = sample_key();

        cache.set(&key, &sample_result(), Duration::from_secs(60)).await;
        let cached = cache.get(&key).await;
        assert_eq!(cached, Some(sample_result()));
    }

    #[tokio::test]
    async fn get_missing_key_is_a_miss() {
        let cache = moka_cache();
        assert_eq!(cache.get(&sample_key()).await, None);
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 0);
    }

    #[tokio::test]
    async fn probe_succeeds_against_working_backend() {
        let cache = moka_cache();
        assert_eq!(cache.availability(), CacheAvailability::Unknown);
        assert!(cache.probe().await);
        assert_eq!(cache.availability(), CacheAvailability::Available);
    }

    #[tokio::test]
    async fn probe_failure_marks_unavailable() {
        let config = CacheConfig::default();
        let cache = ResultCache::new(Arc::new(FailingBackend), &config);
        assert!(!cache.probe().await);
        assert_eq!(cache.availability(), CacheAvailability::Unavailable);
    }

    #[tokio::test]
    async fn backend_error_on_get_degrades_availability() {
        let config = CacheConfig::default();
        let cache = ResultCache::new(Arc::new(FailingBackend), &config);

        assert_eq!(cache.get(&sample_key()).await, None);
        assert_eq!(cache.availability(), CacheAvailability::Unavailable);
    }

    #[tokio::test]
    async fn backend_error_on_set_degrades_availability() {
        let config = CacheConfig::default();
        let cache = ResultCache::new(Arc::new(FailingBackend), &config);

        cache
            .set(&sample_key(), &sample_result(), Duration::from_secs(60))
            .await;
        assert_eq!(cache.availability(), CacheAvailability::Unavailable);
    }

    #[tokio::test]
    async fn unavailable_cache_short_circuits_without_touching_backend() {
        let config = CacheConfig::default();
        let cache = ResultCache::new(Arc::new(FailingBackend), &config);

        // First call trips the breaker, second is a silent bypass
        let _ = cache.get(&sample_key()).await;
        let misses_after_first = cache.stats().misses;
        assert_eq!(cache.get(&sample_key()).await, None);
        assert_eq!(cache.stats().misses, misses_after_first);
    }

    #[tokio::test]
    async fn hanging_backend_hits_the_deadline() {
        let config = CacheConfig {
            op_timeout_ms: 20,
            ..CacheConfig::default()
        };
        let cache = ResultCache::new(Arc::new(HangingBackend), &config);

        assert_eq!(cache.get(&sample_key()).await, None);
        assert_eq!(cache.availability(), CacheAvailability::Unavailable);
    }

    #[tokio::test]
    async fn stats_track_hits_and_misses() {
        let cache = moka_cache();
        let key = sample_key();

        cache.set(&key, &sample_result(), Duration::from_secs(60)).await;
        let _ = cache.get(&key).await;
        let _ = cache.get(&Fingerprint::from_points(&[])).await;

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn disabled_config_starts_unavailable() {
        let config = CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        };
        let backend = Arc::new(MokaBackend::new(config.max_entries, config.ttl()));
        let cache = ResultCache::new(backend, &config);

        assert_eq!(cache.availability(), CacheAvailability::Unavailable);
        cache
            .set(&sample_key(), &sample_result(), Duration::from_secs(60))
            .await;
        assert_eq!(cache.get(&sample_key()).await, None);
    }

    #[test]
    fn debug_impl_reports_availability() {
        let cache = moka_cache();
        let debug = format!("{cache:?}");
        assert!(debug.contains("ResultCache"));
        assert!(debug.contains("Unknown"));
    }
}
