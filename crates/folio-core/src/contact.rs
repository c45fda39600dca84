//! Contact form entries and the in-memory inbox.
//!
//! Submissions are volatile by design: the inbox lives in process memory and
//! resets on restart. There is no persistence layer behind it.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of stored messages before the oldest entry is evicted.
pub const MAX_STORED_MESSAGES: usize = 1000;

/// Error returned when a submission fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    /// One or more required fields were missing or blank.
    #[error("All fields are required.")]
    MissingFields,
}

/// Raw contact form payload as posted by the frontend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactSubmission {
    /// Sender name.
    #[serde(default)]
    pub name: String,
    /// Sender email address.
    #[serde(default)]
    pub email: String,
    /// Message subject line.
    #[serde(default)]
    pub subject: String,
    /// Message body.
    #[serde(default)]
    pub message: String,
}

impl ContactSubmission {
    /// Validate and normalize the submission into a stored entry.
    ///
    /// All four fields must be non-empty after trimming. Whitespace is
    /// stripped, the email is lowercased, and the entry is stamped with a
    /// fresh id and the current UTC time.
    pub fn into_message(self, client_ip: Option<String>) -> Result<ContactMessage, ContactError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let subject = self.subject.trim();
        let message = self.message.trim();

        if name.is_empty() || email.is_empty() || subject.is_empty() || message.is_empty() {
            return Err(ContactError::MissingFields);
        }

        Ok(ContactMessage {
            id: Uuid::now_v7(),
            name: name.to_string(),
            email: email.to_lowercase(),
            subject: subject.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
            client_ip,
        })
    }
}

/// A validated, normalized contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Unique message id.
    pub id: Uuid,
    /// Sender name (trimmed).
    pub name: String,
    /// Sender email (trimmed, lowercased).
    pub email: String,
    /// Subject line (trimmed).
    pub subject: String,
    /// Message body (trimmed).
    pub message: String,
    /// Receipt time.
    pub timestamp: DateTime<Utc>,
    /// Client address, when known (first `x-forwarded-for` value).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
}

/// Bounded in-memory store of received contact messages.
#[derive(Debug, Default)]
pub struct Inbox {
    messages: Mutex<VecDeque<ContactMessage>>,
}

impl Inbox {
    /// Create an empty inbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, evicting the oldest entry past [`MAX_STORED_MESSAGES`].
    pub fn push(&self, message: ContactMessage) {
        let mut messages = self.messages.lock();
        if messages.len() >= MAX_STORED_MESSAGES {
            let _ = messages.pop_front();
        }
        messages.push_back(message);
    }

    /// Number of stored messages.
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    /// Whether the inbox holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    /// Most recent messages, newest first, up to `limit`.
    pub fn recent(&self, limit: usize) -> Vec<ContactMessage> {
        let messages = self.messages.lock();
        messages.iter().rev().take(limit).cloned().collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Ada Lovelace".into(),
            email: "Ada@Example.COM".into(),
            subject: "Hello".into(),
            message: "I enjoyed your site.".into(),
        }
    }

    #[test]
    fn valid_submission_becomes_message() {
        let msg = submission().into_message(None).unwrap();
        assert_eq!(msg.name, "Ada Lovelace");
        assert_eq!(msg.email, "ada@example.com");
        assert_eq!(msg.subject, "Hello");
        assert_eq!(msg.message, "I enjoyed your site.");
        assert!(msg.client_ip.is_none());
    }

    #[test]
    fn fields_are_trimmed() {
        let sub = ContactSubmission {
            name: "  Ada  ".into(),
            email: " ada@example.com ".into(),
            subject: " Hi ".into(),
            message: "  body  ".into(),
        };
        let msg = sub.into_message(None).unwrap();
        assert_eq!(msg.name, "Ada");
        assert_eq!(msg.email, "ada@example.com");
        assert_eq!(msg.subject, "Hi");
        assert_eq!(msg.message, "body");
    }

    #[test]
    fn email_is_lowercased() {
        let msg = submission().into_message(None).unwrap();
        assert_eq!(msg.email, "ada@example.com");
    }

    #[test]
    fn missing_name_rejected() {
        let mut sub = submission();
        sub.name = String::new();
        assert_eq!(sub.into_message(None), Err(ContactError::MissingFields));
    }

    #[test]
    fn whitespace_only_field_rejected() {
        let mut sub = submission();
        sub.message = "   \n\t ".into();
        assert_eq!(sub.into_message(None), Err(ContactError::MissingFields));
    }

    #[test]
    fn each_missing_field_rejected() {
        for field in 0..4 {
            let mut sub = submission();
            match field {
                0 => sub.name = String::new(),
                1 => sub.email = String::new(),
                2 => sub.subject = String::new(),
                _ => sub.message = String::new(),
            }
            assert_eq!(sub.into_message(None), Err(ContactError::MissingFields));
        }
    }

    #[test]
    fn client_ip_recorded() {
        let msg = submission()
            .into_message(Some("203.0.113.9".into()))
            .unwrap();
        assert_eq!(msg.client_ip.as_deref(), Some("203.0.113.9"));
    }

    #[test]
    fn ids_are_unique() {
        let a = submission().into_message(None).unwrap();
        let b = submission().into_message(None).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn error_message_matches_api_contract() {
        assert_eq!(
            ContactError::MissingFields.to_string(),
            "All fields are required."
        );
    }

    #[test]
    fn missing_json_fields_default_to_empty() {
        let sub: ContactSubmission = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(sub.name, "Ada");
        assert!(sub.email.is_empty());
        assert_eq!(sub.into_message(None), Err(ContactError::MissingFields));
    }

    // ── Inbox ────────────────────────────────────────────────────────────

    #[test]
    fn inbox_starts_empty() {
        let inbox = Inbox::new();
        assert!(inbox.is_empty());
        assert_eq!(inbox.len(), 0);
    }

    #[test]
    fn inbox_push_and_len() {
        let inbox = Inbox::new();
        inbox.push(submission().into_message(None).unwrap());
        inbox.push(submission().into_message(None).unwrap());
        assert_eq!(inbox.len(), 2);
        assert!(!inbox.is_empty());
    }

    #[test]
    fn inbox_recent_newest_first() {
        let inbox = Inbox::new();
        for i in 0..5 {
            let mut sub = submission();
            sub.subject = format!("msg {i}");
            inbox.push(sub.into_message(None).unwrap());
        }
        let recent = inbox.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].subject, "msg 4");
        assert_eq!(recent[1].subject, "msg 3");
    }

    #[test]
    fn inbox_evicts_oldest_at_cap() {
        let inbox = Inbox::new();
        for i in 0..=MAX_STORED_MESSAGES {
            let mut sub = submission();
            sub.subject = format!("msg {i}");
            inbox.push(sub.into_message(None).unwrap());
        }
        assert_eq!(inbox.len(), MAX_STORED_MESSAGES);
        // "msg 0" was evicted; the newest entry survives
        let recent = inbox.recent(1);
        assert_eq!(recent[0].subject, format!("msg {MAX_STORED_MESSAGES}"));
    }

    #[test]
    fn message_serde_roundtrip() {
        let msg = submission()
            .into_message(Some("198.51.100.7".into()))
            .unwrap();
        let json = serde_json::to_string(&msg).unwrap();
        let back: ContactMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, msg.id);
        assert_eq!(back.email, msg.email);
        assert_eq!(back.client_ip, msg.client_ip);
    }

    #[test]
    fn none_client_ip_omitted_from_json() {
        let msg = submission().into_message(None).unwrap();
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("client_ip").is_none());
    }
}
