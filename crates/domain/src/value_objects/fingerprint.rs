//! Request fingerprint derivation
//!
//! A fingerprint is the cache identity of a point set. Two requests that are
//! permutations of each other, or whose coordinates differ only beyond the
//! sixth decimal digit, produce the same fingerprint.

use std::fmt;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::GeoPoint;

/// Namespace prefix so gateway keys never collide with other cache consumers
const KEY_PREFIX: &str = "geo";

/// Rounding scale: six decimal digits, roughly 11 cm at the equator
const MICRO: f64 = 1e6;

/// Deterministic identity of a point set, used as the cache key
///
/// Derivation:
/// 1. Round each coordinate independently to integer microdegrees,
///    half away from zero.
/// 2. Sort the rounded points ascending by latitude, ties by longitude.
/// 3. Serialize each point as `<lat-micros>,<lng-micros>;` in sorted order.
///    Integer microdegrees keep the canonical form byte-stable across
///    implementations (no float formatting, and `-0.0` collapses to `0`).
/// 4. SHA-256 the canonical bytes, encode as lowercase hex.
/// 5. Prefix with `geo:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Derive the fingerprint of a point set
    ///
    /// Pure and total: an empty set yields a valid (if degenerate)
    /// fingerprint.
    #[must_use]
    pub fn from_points(points: &[GeoPoint]) -> Self {
        let mut rounded: Vec<(i64, i64)> = points
            .iter()
            .map(|p| (micros(p.lat()), micros(p.lng())))
            .collect();
        rounded.sort_unstable();

        let mut canonical = String::with_capacity(rounded.len() * 20);
        for (lat, lng) in &rounded {
            // Infallible for String targets
            let _ = write!(canonical, "{lat},{lng};");
        }

        let digest = Sha256::digest(canonical.as_bytes());
        Self(format!("{KEY_PREFIX}:{}", hex::encode(digest)))
    }

    /// The fingerprint as a cache key string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Round a coordinate to integer microdegrees, half away from zero
#[allow(clippy::cast_possible_truncation)]
fn micros(value: f64) -> i64 {
    // Coordinates are bounded to ±180, so ±180_000_000 fits well within i64
    (value * MICRO).round() as i64
}
