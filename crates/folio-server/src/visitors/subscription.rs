//! Per-client subscription write handle.

use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

/// Buffered payloads per subscription before a send counts as a failure.
pub const SUBSCRIPTION_BUFFER: usize = 32;

/// Opaque id of one open visitor-count subscription.
pub type SubscriptionId = Uuid;

/// One open server-to-client streaming channel.
///
/// The hub owns the subscription for its lifetime; the matching receiver half
/// lives inside the client's SSE stream. Payloads are shared `Arc<String>`s
/// so a broadcast serializes once regardless of audience size.
#[derive(Debug)]
pub struct VisitorSubscription {
    /// Unique subscription id.
    pub id: SubscriptionId,
    tx: mpsc::Sender<Arc<String>>,
}

impl VisitorSubscription {
    /// Create a subscription with a fresh id, returning the receiver half.
    pub fn open() -> (Self, mpsc::Receiver<Arc<String>>) {
        let (tx, rx) = mpsc::channel(SUBSCRIPTION_BUFFER);
        (
            Self {
                id: Uuid::now_v7(),
                tx,
            },
            rx,
        )
    }

    /// Send a payload to the client without blocking.
    ///
    /// Returns `false` when the channel is closed (client gone) or full
    /// (client not draining) — either is treated as a write failure.
    pub fn send(&self, payload: Arc<String>) -> bool {
        self.tx.try_send(payload).is_ok()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
