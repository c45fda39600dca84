//! Live visitor counting over Server-Sent Events.
//!
//! ## Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `subscription` | Per-client write handle (non-blocking send) |
//! | `hub` | Registry + counter: subscribe/unsubscribe, fan-out on change |
//! | `feed` | SSE stream adapter with unsubscribe-on-drop guard |
//!
//! ## Data Flow
//!
//! `GET /api/visitors` → `hub.subscribe()` (count += 1, broadcast) →
//! `feed` streams `{"count":N}` payloads to the client. Client disconnect or
//! write failure → `hub.unsubscribe()` (count -= 1, broadcast to survivors).

pub mod feed;
pub mod hub;
pub mod subscription;

pub use feed::VisitorFeed;
pub use hub::{VisitorCount, VisitorHub};
pub use subscription::{SubscriptionId, VisitorSubscription};
