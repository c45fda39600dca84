//! Contact-notification relay.
//!
//! When mail settings are configured, accepted contact submissions are
//! forwarded as a JSON notification to the configured mail API endpoint.
//! Delivery is strictly best-effort: failures are logged and never surface
//! to the submitting client.

use std::time::Duration;

use folio_core::contact::ContactMessage;
use folio_settings::MailSettings;
use tracing::{info, warn};

/// Timeout for relay requests.
const RELAY_TIMEOUT: Duration = Duration::from_secs(15);

/// Relays contact submissions to a mail API endpoint.
pub struct ContactNotifier {
    client: reqwest::Client,
    settings: MailSettings,
}

impl std::fmt::Debug for ContactNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactNotifier")
            .field("endpoint", &self.settings.endpoint)
            .finish_non_exhaustive()
    }
}

impl ContactNotifier {
    /// Build a notifier from mail settings.
    ///
    /// Returns `None` when the endpoint is blank (relay disabled) or the
    /// HTTP client cannot be constructed.
    pub fn from_settings(settings: &MailSettings) -> Option<Self> {
        if settings.endpoint.trim().is_empty() {
            return None;
        }
        let client = match reqwest::Client::builder().timeout(RELAY_TIMEOUT).build() {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "failed to build mail relay client, relay disabled");
                return None;
            }
        };
        Some(Self {
            client,
            settings: settings.clone(),
        })
    }

    /// Forward one contact message. Never fails the caller.
    pub async fn notify(&self, message: &ContactMessage) {
        let payload = relay_payload(message, self.settings.to.as_deref());

        let mut request = self.client.post(&self.settings.endpoint).json(&payload);
        if let Some(token) = &self.settings.token {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                info!(message_id = %message.id, "contact notification relayed");
            }
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                warn!(
                    message_id = %message.id,
                    status,
                    body = %body,
                    "contact notification rejected"
                );
            }
            Err(e) => {
                warn!(message_id = %message.id, error = %e, "contact notification failed");
            }
        }
    }
}

/// Build the relay request body for one message.
fn relay_payload(message: &ContactMessage, to: Option<&str>) -> serde_json::Value {
    let text = format!(
        "Name: {}\nEmail: {}\n\n{}\n\nSent at {}",
        message.name,
        message.email,
        message.message,
        message.timestamp.to_rfc3339(),
    );
    let mut payload = serde_json::json!({
        "subject": format!("[Portfolio] {}", message.subject),
        "replyTo": message.email,
        "text": text,
    });
    if let Some(to) = to {
        payload["to"] = serde_json::json!(to);
    }
    payload
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
