//! `GET /api/github` — GitHub profile and repo stats proxy.

use axum::Json;
use axum::extract::State;
use metrics::counter;
use tracing::warn;

use crate::error::ApiError;
use crate::metrics::{GITHUB_PROXY_ERRORS_TOTAL, GITHUB_PROXY_REQUESTS_TOTAL};
use crate::server::AppState;

/// Error message when the upstream API cannot be reached.
pub const UNAVAILABLE_MESSAGE: &str = "GitHub API unavailable.";

/// Proxy the configured user's profile and top repos.
pub async fn overview(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    counter!(GITHUB_PROXY_REQUESTS_TOTAL).increment(1);

    match state.github.fetch_overview().await {
        Ok(overview) => Ok(Json(serde_json::json!({
            "ok": true,
            "user": overview.user,
            "repos": overview.repos,
        }))),
        Err(e) => {
            counter!(GITHUB_PROXY_ERRORS_TOTAL).increment(1);
            warn!(error = %e, "github proxy request failed");
            Err(ApiError::Upstream(UNAVAILABLE_MESSAGE.to_string()))
        }
    }
}
