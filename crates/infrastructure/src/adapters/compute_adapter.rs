//! Compute service adapter - Implements ComputePort over HTTP
//!
//! Sends the point set at its original precision to the external compute
//! endpoint and normalizes every failure into `ApplicationError::Upstream`.
//! No retries here; retry policy is a deployment concern.

use application::error::ApplicationError;
use application::ports::ComputePort;
use async_trait::async_trait;
use domain::value_objects::{GeoPoint, GeoResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::UpstreamConfig;

/// Request body for the compute endpoint
#[derive(Debug, Serialize)]
struct ComputeRequest<'a> {
    points: &'a [GeoPoint],
}

/// Structured error body the compute service returns on failure
#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    detail: Option<String>,
}

/// HTTP client for the external centroid/bounding-box service
pub struct ComputeAdapter {
    client: reqwest::Client,
    endpoint: String,
}

impl std::fmt::Debug for ComputeAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComputeAdapter")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ComputeAdapter {
    /// Create an adapter from upstream configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client fails
    /// to initialize.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ApplicationError> {
        if config.base_url.trim().is_empty() {
            return Err(ApplicationError::Configuration(
                "upstream base URL is required".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/process", config.base_url.trim_end_matches('/')),
        })
    }

    /// Turn a non-2xx response into an upstream error, pulling the detail
    /// out of the structured body when one is present
    async fn error_from_response(response: reqwest::Response) -> ApplicationError {
        let status = response.status().as_u16();
        let detail = response
            .json::<UpstreamErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail);
        ApplicationError::upstream(Some(status), detail)
    }
}

#[async_trait]
impl ComputePort for ComputeAdapter {
    #[instrument(skip(self, points), fields(points = points.len()))]
    async fn compute(&self, points: &[GeoPoint]) -> Result<GeoResult, ApplicationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ComputeRequest { points })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Compute service unreachable");
                ApplicationError::upstream(None, None)
            })?;

        if !response.status().is_success() {
            let err = Self::error_from_response(response).await;
            warn!(error = %err, "Compute service returned an error");
            return Err(err);
        }

        let result = response.json::<GeoResult>().await.map_err(|e| {
            warn!(error = %e, "Compute service returned an undecodable body");
            ApplicationError::upstream(None, None)
        })?;

        debug!(
            centroid_lat = result.centroid.lat,
            centroid_lng = result.centroid.lng,
            "Computed geometry result"
        );
        Ok(result)
    }
}
