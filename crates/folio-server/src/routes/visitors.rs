//! `GET /api/visitors` — live visitor count over Server-Sent Events.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;

use crate::server::AppState;
use crate::visitors::VisitorFeed;

/// Comment keep-alive interval, preventing idle-timeout disconnection by
/// proxies between the server and the browser.
pub const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(25);

/// Open a visitor-count subscription as a long-lived SSE response.
pub async fn subscribe(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let feed = VisitorFeed::attach(&state.hub).await;
    Sse::new(feed.into_stream()).keep_alive(
        KeepAlive::new()
            .interval(KEEP_ALIVE_INTERVAL)
            .text("heartbeat"),
    )
}
