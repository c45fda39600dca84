//! Visitor registry and count broadcasting.
//!
//! The hub is the owned service behind `GET /api/visitors`: it holds every
//! open subscription, derives the visitor count from registry membership,
//! and fans the count out to all subscribers whenever the registry changes.
//!
//! The count is never tracked independently of the registry — a subscription
//! is only decremented when its map entry is actually removed, so the count
//! cannot go negative and a disconnect observed twice (client close racing a
//! failed write) decrements exactly once.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use metrics::{counter, gauge};
use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, warn};

use super::subscription::{SubscriptionId, VisitorSubscription};
use crate::metrics::{
    SSE_BROADCAST_FAILURES_TOTAL, SSE_CONNECTIONS_ACTIVE, SSE_CONNECTIONS_TOTAL,
    SSE_DISCONNECTIONS_TOTAL,
};

/// Wire payload pushed on every registry change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorCount {
    /// Number of currently open subscriptions.
    pub count: usize,
}

/// Registry of open visitor subscriptions plus the derived live count.
pub struct VisitorHub {
    /// Open subscriptions indexed by id.
    subscriptions: RwLock<HashMap<SubscriptionId, VisitorSubscription>>,
    /// Atomic mirror of the registry size (avoids read-locking for count queries).
    active_count: AtomicUsize,
}

impl VisitorHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            active_count: AtomicUsize::new(0),
        }
    }

    /// Register a new subscription and push the updated count to everyone.
    ///
    /// The new subscriber receives the updated count too (its first event).
    pub async fn subscribe(&self) -> (SubscriptionId, mpsc::Receiver<Arc<String>>) {
        let (subscription, rx) = VisitorSubscription::open();
        let id = subscription.id;
        {
            let mut subs = self.subscriptions.write().await;
            if subs.insert(id, subscription).is_none() {
                let _ = self.active_count.fetch_add(1, Ordering::Relaxed);
            }
        }
        counter!(SSE_CONNECTIONS_TOTAL).increment(1);
        gauge!(SSE_CONNECTIONS_ACTIVE).increment(1.0);
        debug!(subscription_id = %id, "visitor subscribed");
        self.broadcast().await;
        (id, rx)
    }

    /// Remove a subscription and push the updated count to the survivors.
    ///
    /// Idempotent: removing an unknown or already-removed id is a no-op and
    /// returns `false` without broadcasting.
    pub async fn unsubscribe(&self, id: &SubscriptionId) -> bool {
        let removed = { self.subscriptions.write().await.remove(id).is_some() };
        if removed {
            let _ = self.active_count.fetch_sub(1, Ordering::Relaxed);
            counter!(SSE_DISCONNECTIONS_TOTAL).increment(1);
            gauge!(SSE_CONNECTIONS_ACTIVE).decrement(1.0);
            debug!(subscription_id = %id, "visitor unsubscribed");
            self.broadcast().await;
        }
        removed
    }

    /// Serialize the current count once and write it to every subscription.
    ///
    /// Each pass sees a consistent registry snapshot (read lock held across
    /// the fan-out). A failed write never blocks delivery to the others: the
    /// failed handles are removed afterwards and the loop runs again so
    /// survivors observe the reduced count. The registry strictly shrinks on
    /// every extra pass, so the loop terminates.
    pub async fn broadcast(&self) {
        loop {
            let mut failed: Vec<SubscriptionId> = Vec::new();
            {
                let subs = self.subscriptions.read().await;
                let payload = VisitorCount { count: subs.len() };
                let json = match serde_json::to_string(&payload) {
                    Ok(json) => Arc::new(json),
                    Err(e) => {
                        warn!(error = %e, "failed to serialize visitor count");
                        return;
                    }
                };
                for subscription in subs.values() {
                    if !subscription.send(Arc::clone(&json)) {
                        counter!(SSE_BROADCAST_FAILURES_TOTAL).increment(1);
                        failed.push(subscription.id);
                    }
                }
                debug!(
                    count = payload.count,
                    recipients = subs.len() - failed.len(),
                    "visitor count broadcast"
                );
            }

            if failed.is_empty() {
                return;
            }

            let mut subs = self.subscriptions.write().await;
            for id in &failed {
                if subs.remove(id).is_some() {
                    let _ = self.active_count.fetch_sub(1, Ordering::Relaxed);
                    counter!(SSE_DISCONNECTIONS_TOTAL).increment(1);
                    gauge!(SSE_CONNECTIONS_ACTIVE).decrement(1.0);
                    warn!(subscription_id = %id, "dropping visitor subscription after failed write");
                }
            }
        }
    }

    /// Number of currently open subscriptions.
    pub fn visitor_count(&self) -> usize {
        self.active_count.load(Ordering::Relaxed)
    }
}

impl Default for VisitorHub {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
