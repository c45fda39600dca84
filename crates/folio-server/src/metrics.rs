//! Prometheus metrics recorder and `/metrics` endpoint handler.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Install the Prometheus metrics recorder (global).
///
/// Returns the `PrometheusHandle` used to render the `/metrics` endpoint.
/// Must be called once at process startup before any metrics are recorded.
pub fn install_recorder() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install metrics recorder");
    info!("prometheus metrics recorder installed");
    handle
}

/// Render Prometheus text format from the installed recorder.
pub fn render(handle: &PrometheusHandle) -> String {
    handle.render()
}

// Metric name constants to avoid typos across modules.

/// SSE subscriptions opened total (counter).
pub const SSE_CONNECTIONS_TOTAL: &str = "sse_connections_total";
/// SSE subscriptions closed total (counter).
pub const SSE_DISCONNECTIONS_TOTAL: &str = "sse_disconnections_total";
/// Currently open SSE subscriptions (gauge).
pub const SSE_CONNECTIONS_ACTIVE: &str = "sse_connections_active";
/// Broadcast write failures total (counter).
pub const SSE_BROADCAST_FAILURES_TOTAL: &str = "sse_broadcast_failures_total";
/// Contact messages accepted total (counter).
pub const CONTACT_MESSAGES_TOTAL: &str = "contact_messages_total";
/// Contact submissions rejected by validation total (counter).
pub const CONTACT_REJECTED_TOTAL: &str = "contact_rejected_total";
/// GitHub proxy requests total (counter).
pub const GITHUB_PROXY_REQUESTS_TOTAL: &str = "github_proxy_requests_total";
/// GitHub proxy upstream failures total (counter).
pub const GITHUB_PROXY_ERRORS_TOTAL: &str = "github_proxy_errors_total";
