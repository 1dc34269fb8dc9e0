//! Health check handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
///
/// The gateway is ready even when the cache is down (requests fall through
/// to upstream), so this always reports ready; the cache block is
/// diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub cache: CacheStatus,
}

/// Status of the result cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStatus {
    pub usable: bool,
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
}

/// Readiness check with cache diagnostics
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let stats = state.gateway.cache_stats();

    Json(ReadinessResponse {
        ready: true,
        cache: CacheStatus {
            usable: state.gateway.cache_usable(),
            hits: stats.hits,
            misses: stats.misses,
            entries: stats.entries,
        },
    })
}
