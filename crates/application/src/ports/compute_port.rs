//! Compute service port
//!
//! Defines the interface to the external geometry computation service.

use async_trait::async_trait;
use domain::value_objects::{GeoPoint, GeoResult};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the external centroid/bounding-box computation
///
/// Implementations send the points at their original precision (rounding is
/// a cache-identity concern only) and normalize failures into
/// [`ApplicationError::Upstream`]. No retries at this layer.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ComputePort: Send + Sync {
    /// Compute centroid and bounds for a point set
    async fn compute(&self, points: &[GeoPoint]) -> Result<GeoResult, ApplicationError>;
}
