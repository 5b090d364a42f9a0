//! Health check endpoint.

use axum::Json;
use serde::Serialize;
use types::EpochSecs;

use crate::state::epoch_now;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Health status.
    pub status: &'static str,
    /// Current wall-clock time (epoch seconds).
    pub timestamp: EpochSecs,
}

/// Liveness probe: `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok", timestamp: epoch_now() })
}
