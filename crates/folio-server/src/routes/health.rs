//! `GET /health` endpoint.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::server::AppState;

/// Health check response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server is running.
    pub status: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
    /// Currently open visitor subscriptions.
    pub visitors: usize,
    /// Contact messages received since startup.
    pub messages: usize,
}

/// Build a health response from live counters.
pub fn health_check(started_at: Instant, visitors: usize, messages: usize) -> HealthResponse {
    HealthResponse {
        status: "ok".into(),
        uptime_secs: started_at.elapsed().as_secs(),
        visitors,
        messages,
    }
}

/// Report process liveness and live counters.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health_check(
        state.started_at,
        state.hub.visitor_count(),
        state.inbox.len(),
    ))
}
