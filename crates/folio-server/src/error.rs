//! API error responses.
//!
//! Handlers surface failures as the `{"ok":false,"error":…}` envelope the
//! frontend expects, with a status code per failure class.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors a request handler can surface to the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request payload failed validation (HTTP 400).
    #[error("{0}")]
    Validation(String),

    /// An upstream dependency failed (HTTP 502).
    #[error("{0}")]
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        let body = serde_json::json!({
            "ok": false,
            "error": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
