//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Fallback detail when the compute service gives no structured error body
pub const UPSTREAM_GENERIC_DETAIL: &str = "Error communicating with compute service";

/// Fallback status when no HTTP status is available (network failure, timeout)
pub const UPSTREAM_DEFAULT_STATUS: u16 = 500;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The compute service rejected or failed the request.
    ///
    /// `status` and `detail` are surfaced to the caller unchanged.
    #[error("Upstream error ({status}): {detail}")]
    Upstream {
        /// HTTP status reported by the compute service (500 when none)
        status: u16,
        /// Human-readable detail from the upstream error body
        detail: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Build an upstream error, filling in defaults for missing parts
    #[must_use]
    pub fn upstream(status: Option<u16>, detail: Option<String>) -> Self {
        Self::Upstream {
            status: status.unwrap_or(UPSTREAM_DEFAULT_STATUS),
            detail: detail.unwrap_or_else(|| UPSTREAM_GENERIC_DETAIL.to_string()),
        }
    }
}
