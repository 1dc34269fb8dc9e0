//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod cache_port;
mod compute_port;

pub use cache_port::{CacheAvailability, CacheStats, GeoCachePort, ttl};
#[cfg(test)]
pub use cache_port::MockGeoCachePort;
pub use compute_port::ComputePort;
#[cfg(test)]
pub use compute_port::MockComputePort;
