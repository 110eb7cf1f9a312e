//! Health check endpoint for container orchestration.
//!
//! Liveness probe used by Kubernetes and load balancers. It only checks that the
//! process can answer HTTP, and echoes the deployed version so rollouts can be
//! verified from the probe output.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::probe;
use crate::state::AppState;

pub const HEALTHY: &str = "healthy";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub version: String,
}

/// Health check handler.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTHY,
        timestamp: probe::timestamp_now(),
        version: state.config.app.version.clone(),
    })
}
