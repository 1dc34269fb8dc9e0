//! Computed geometry result types
//!
//! These mirror the compute service's response shape. The gateway passes
//! them through untouched; it never recomputes or adjusts the values.

use serde::{Deserialize, Serialize};

/// Centroid of a point set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    /// Latitude of the centroid
    pub lat: f64,
    /// Longitude of the centroid
    pub lng: f64,
}

/// Axis-aligned bounding box of a point set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Northernmost latitude
    pub north: f64,
    /// Southernmost latitude
    pub south: f64,
    /// Easternmost longitude
    pub east: f64,
    /// Westernmost longitude
    pub west: f64,
}

/// Result payload returned by the compute service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoResult {
    /// Centroid of the submitted points
    pub centroid: Centroid,
    /// Bounding box of the submitted points
    pub bounds: BoundingBox,
}
