//! SSE stream adapter for one visitor subscription.
//!
//! The feed owns the receiver half of a subscription plus a guard that
//! unsubscribes from the hub when the stream is dropped — which is how a
//! client disconnect (or a failed keep-alive write tearing the response
//! down) reaches the registry. The guard and a broadcast-side write failure
//! race safely: removal is keyed by id and only the first wins.

use std::convert::Infallible;
use std::sync::Arc;

use axum::response::sse::Event;
use futures::Stream;
use futures::StreamExt as _;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

use super::hub::VisitorHub;
use super::subscription::SubscriptionId;

/// Unsubscribes the feed's subscription when dropped.
struct FeedGuard {
    id: SubscriptionId,
    hub: Arc<VisitorHub>,
}

impl Drop for FeedGuard {
    fn drop(&mut self) {
        let hub = Arc::clone(&self.hub);
        let id = self.id;
        // Drop runs in sync context; hand the async removal to the runtime.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            drop(handle.spawn(async move {
                let _ = hub.unsubscribe(&id).await;
            }));
        }
    }
}

/// A live visitor-count feed for one client.
pub struct VisitorFeed {
    id: SubscriptionId,
    rx: mpsc::Receiver<Arc<String>>,
    guard: FeedGuard,
}

impl VisitorFeed {
    /// Subscribe to the hub and wrap the subscription as a feed.
    pub async fn attach(hub: &Arc<VisitorHub>) -> Self {
        let (id, rx) = hub.subscribe().await;
        debug!(subscription_id = %id, "visitor feed attached");
        Self {
            id,
            rx,
            guard: FeedGuard {
                id,
                hub: Arc::clone(hub),
            },
        }
    }

    /// This feed's subscription id.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Convert into an SSE event stream.
    ///
    /// The guard moves into the stream, so dropping the response (client
    /// disconnect, server shutdown) unsubscribes automatically.
    pub fn into_stream(self) -> impl Stream<Item = Result<Event, Infallible>> {
        let Self { rx, guard, .. } = self;
        ReceiverStream::new(rx).map(move |payload| {
            let _ = &guard;
            Ok(Event::default().data(payload.as_str()))
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn settled(hub: &Arc<VisitorHub>, expected: usize) -> bool {
        // The guard unsubscribes from a spawned task; poll briefly.
        for _ in 0..50 {
            if hub.visitor_count() == expected {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        hub.visitor_count() == expected
    }

    #[tokio::test]
    async fn attach_registers_with_hub() {
        let hub = Arc::new(VisitorHub::new());
        let feed = VisitorFeed::attach(&hub).await;
        assert_eq!(hub.visitor_count(), 1);
        drop(feed);
        assert!(settled(&hub, 0).await);
    }

    #[tokio::test]
    async fn stream_yields_count_events() {
        let hub = Arc::new(VisitorHub::new());
        let feed = VisitorFeed::attach(&hub).await;
        let mut stream = Box::pin(feed.into_stream());

        // The subscribe broadcast is the first event.
        let event = stream.next().await.unwrap();
        assert!(event.is_ok());
    }

    #[tokio::test]
    async fn dropping_stream_unsubscribes() {
        let hub = Arc::new(VisitorHub::new());
        let feed = VisitorFeed::attach(&hub).await;
        let stream = Box::pin(feed.into_stream());
        assert_eq!(hub.visitor_count(), 1);

        drop(stream);
        assert!(settled(&hub, 0).await);
    }

    #[tokio::test]
    async fn two_feeds_track_independently() {
        let hub = Arc::new(VisitorHub::new());
        let feed_a = VisitorFeed::attach(&hub).await;
        let feed_b = VisitorFeed::attach(&hub).await;
        assert_ne!(feed_a.id(), feed_b.id());
        assert_eq!(hub.visitor_count(), 2);

        drop(feed_a);
        assert!(settled(&hub, 1).await);
        drop(feed_b);
        assert!(settled(&hub, 0).await);
    }

    #[tokio::test]
    async fn guard_tolerates_prior_removal() {
        let hub = Arc::new(VisitorHub::new());
        let feed = VisitorFeed::attach(&hub).await;
        let id = feed.id();

        // Simulate a broadcast-side write failure removing the entry first.
        assert!(hub.unsubscribe(&id).await);
        assert_eq!(hub.visitor_count(), 0);

        // Guard drop must not double-decrement.
        drop(feed);
        assert!(settled(&hub, 0).await);
    }
}
