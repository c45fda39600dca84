//! `POST /api/contact` — contact form submission.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use folio_core::contact::ContactSubmission;
use metrics::counter;
use tracing::info;

use crate::error::ApiError;
use crate::metrics::{CONTACT_MESSAGES_TOTAL, CONTACT_REJECTED_TOTAL};
use crate::server::AppState;

/// Body of the success response.
pub const ACCEPTED_MESSAGE: &str = "Message received! I'll get back to you soon.";

/// Validate, store, and optionally relay a contact submission.
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(submission): Json<ContactSubmission>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let client_ip = forwarded_for(&headers);
    let message = submission.into_message(client_ip).map_err(|e| {
        counter!(CONTACT_REJECTED_TOTAL).increment(1);
        ApiError::Validation(e.to_string())
    })?;

    info!(
        message_id = %message.id,
        name = %message.name,
        email = %message.email,
        subject = %message.subject,
        "contact message received"
    );
    counter!(CONTACT_MESSAGES_TOTAL).increment(1);

    // Relay off the request path; the response never depends on the outcome.
    if let Some(notifier) = &state.notifier {
        let notifier = Arc::clone(notifier);
        let relayed = message.clone();
        drop(tokio::spawn(async move {
            notifier.notify(&relayed).await;
        }));
    }

    state.inbox.push(message);

    Ok(Json(serde_json::json!({
        "ok": true,
        "message": ACCEPTED_MESSAGE,
    })))
}

/// First address in the `x-forwarded-for` header, if any.
fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()
        .map(|addr| addr.trim().to_string())
        .filter(|addr| !addr.is_empty())
}
