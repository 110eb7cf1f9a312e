//! Landing endpoint.
//!
//! Identifies which deployment (environment, version, host) answered the request,
//! which is what a pipeline smoke test checks after a rollout.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::probe;
use crate::state::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to DevOps EKS Pipeline Demo!";

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
    pub environment: String,
    pub version: String,
    pub hostname: String,
}

pub async fn index(State(state): State<AppState>) -> Json<HomeResponse> {
    let app = &state.config.app;
    Json(HomeResponse {
        message: WELCOME_MESSAGE,
        environment: app.environment.clone(),
        version: app.version.clone(),
        hostname: probe::host_name(),
    })
}
