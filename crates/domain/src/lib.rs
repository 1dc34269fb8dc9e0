//! Domain layer for GeoGate
//!
//! Contains the core value objects of the gateway (points, fingerprints,
//! computed geometry results) and domain errors. This layer has no I/O and
//! no async code.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::*;
