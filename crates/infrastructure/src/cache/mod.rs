//! Cache implementations
//!
//! Two layers:
//! - `CacheBackend`: the raw fallible key/value store ([`MokaBackend`] in
//!   this build; the trait is the seam for a remote backend).
//! - [`ResultCache`]: implements the application's `GeoCachePort` over a
//!   backend, owning availability state and absorbing backend failures.

mod backend;
mod result_cache;

pub use backend::{CacheBackend, CacheBackendError, MokaBackend};
pub use result_cache::ResultCache;
