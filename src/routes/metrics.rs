//! Process metrics endpoint.
//!
//! Reports uptime and memory footprint as JSON for quick inspection during a
//! rollout. This is not a Prometheus exposition endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::probe::{self, MemoryUsage};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    /// Seconds since `main` started
    pub uptime: f64,
    pub memory: MemoryUsage,
    pub timestamp: String,
}

pub async fn metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        uptime: state.uptime().as_secs_f64(),
        memory: probe::process_memory(),
        timestamp: probe::timestamp_now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn uptime_grows_between_calls() {
        let state = AppState::new(AppConfig::default());

        let Json(first) = metrics(State(state.clone())).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        let Json(second) = metrics(State(state)).await;

        assert!(first.uptime >= 0.0);
        assert!(second.uptime > first.uptime);
    }

    #[tokio::test]
    async fn uptime_counts_from_recorded_start() {
        let started_at = Instant::now()
            .checked_sub(Duration::from_secs(5))
            .expect("monotonic clock is past 5s");
        let state = AppState::with_start(AppConfig::default(), started_at);

        let Json(body) = metrics(State(state)).await;
        assert!(body.uptime >= 5.0);
    }

    #[tokio::test]
    async fn reports_memory_and_timestamp() {
        let Json(body) = metrics(State(AppState::new(AppConfig::default()))).await;
        assert!(body.memory.rss > 0);
        assert!(body.memory.heap_used > 0);
        assert!(body.memory.heap_total >= body.memory.heap_used);
        assert_eq!(body.memory.external, 0);
        assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());

        let json = serde_json::to_value(&body).unwrap();
        assert!(json["uptime"].is_f64());
        for key in ["rss", "heapTotal", "heapUsed", "external"] {
            assert!(json["memory"][key].is_u64(), "memory.{} missing", key);
        }
        assert_eq!(json["memory"].as_object().map(|m| m.len()), Some(4));
    }
}
