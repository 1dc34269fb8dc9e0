//! Value Objects - Immutable, identity-less domain primitives

mod fingerprint;
mod geo_point;
mod geo_result;

pub use fingerprint::Fingerprint;
pub use geo_point::{GeoPoint, InvalidCoordinates};
pub use geo_result::{BoundingBox, Centroid, GeoResult};
