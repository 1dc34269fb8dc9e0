//! Point-set processing handler
//!
//! The single gateway endpoint: validates the submitted points at the
//! boundary, then hands them to the gateway service. Validation messages
//! name the failing index so form UIs can highlight the offending row.

use axum::{Json, extract::State};
use domain::value_objects::{GeoPoint, GeoResult};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Request body for point processing
///
/// `points` is kept loose (`Value`) so malformed entries produce precise
/// 400s instead of axum's generic deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    /// Submitted points, validated element by element
    pub points: Option<Value>,
}

/// Process a set of points into a centroid and bounding box
///
/// POST /api/process
#[instrument(skip(state, request))]
pub async fn process_points(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<GeoResult>, ApiError> {
    let points = validate_points(request.points.as_ref())?;
    let result = state.gateway.process(&points).await?;
    Ok(Json(result))
}

/// Validate the raw `points` value into domain points
///
/// Mirrors the compute service's own boundary checks so both services
/// reject malformed input with the same messages.
fn validate_points(points: Option<&Value>) -> Result<Vec<GeoPoint>, ApiError> {
    let Some(points) = points else {
        return Err(ApiError::BadRequest(
            "Missing 'points' field in request body.".to_string(),
        ));
    };

    let Some(entries) = points.as_array() else {
        return Err(ApiError::BadRequest(
            "'points' field must be an array.".to_string(),
        ));
    };

    if entries.is_empty() {
        return Err(ApiError::BadRequest(
            "'points' array must not be empty.".to_string(),
        ));
    }

    let mut validated = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        let Some(obj) = entry.as_object() else {
            return Err(ApiError::BadRequest(format!(
                "Point at index {idx} must be an object."
            )));
        };

        if !obj.contains_key("lat") || !obj.contains_key("lng") {
            return Err(ApiError::BadRequest(format!(
                "Point at index {idx} must include 'lat' and 'lng'."
            )));
        }

        let (Some(lat), Some(lng)) = (
            obj.get("lat").and_then(Value::as_f64),
            obj.get("lng").and_then(Value::as_f64),
        ) else {
            return Err(ApiError::BadRequest(format!(
                "Point at index {idx} must have numeric 'lat' and 'lng'."
            )));
        };

        if !(-90.0..=90.0).contains(&lat) {
            return Err(ApiError::BadRequest(format!(
                "'lat' at index {idx} must be between -90 and 90."
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(ApiError::BadRequest(format!(
                "'lng' at index {idx} must be between -180 and 180."
            )));
        }

        validated.push(GeoPoint::new_unchecked(lat, lng));
    }

    Ok(validated)
}
