//! Server assembly: shared state, router, and startup.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};
use folio_core::contact::Inbox;
use folio_github::GithubClient;
use folio_settings::FolioSettings;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::notify::ContactNotifier;
use crate::routes;
use crate::shutdown::ShutdownCoordinator;
use crate::visitors::VisitorHub;

/// Errors raised during server startup.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The listener could not be bound.
    #[error("failed to bind listener: {0}")]
    Io(#[from] std::io::Error),

    /// The outbound GitHub client could not be constructed.
    #[error("failed to build github client: {0}")]
    Github(#[from] folio_github::GithubError),
}

/// Shared state accessible from axum handlers.
///
/// All of this is process-local and lost on restart; there is no storage
/// behind any of it.
#[derive(Clone)]
pub struct AppState {
    /// Loaded settings snapshot.
    pub settings: Arc<FolioSettings>,
    /// Visitor registry + broadcaster.
    pub hub: Arc<VisitorHub>,
    /// In-memory contact inbox.
    pub inbox: Arc<Inbox>,
    /// Outbound GitHub client.
    pub github: Arc<GithubClient>,
    /// Optional contact-notification relay.
    pub notifier: Option<Arc<ContactNotifier>>,
    /// Prometheus render handle, when the recorder is installed.
    pub metrics: Option<PrometheusHandle>,
    /// When the server started.
    pub started_at: Instant,
}

impl AppState {
    /// Build fresh state from settings.
    pub fn new(
        settings: Arc<FolioSettings>,
        metrics: Option<PrometheusHandle>,
    ) -> Result<Self, ServerError> {
        let github = Arc::new(GithubClient::new(&settings.github)?);
        let notifier = settings
            .mail
            .as_ref()
            .and_then(ContactNotifier::from_settings)
            .map(Arc::new);

        Ok(Self {
            settings,
            hub: Arc::new(VisitorHub::new()),
            inbox: Arc::new(Inbox::new()),
            github,
            notifier,
            metrics,
            started_at: Instant::now(),
        })
    }
}

/// Build the axum router with all routes.
///
/// Non-`/api` paths fall through to the static site, with `index.html` as
/// the SPA fallback for unknown paths.
pub fn build_router(state: AppState) -> Router {
    let site_dir = state.settings.server.site_dir.clone();
    let index = std::path::Path::new(&site_dir).join("index.html");
    let site = ServeDir::new(&site_dir).not_found_service(ServeFile::new(index));

    Router::new()
        .route("/api/contact", post(routes::contact::submit))
        .route("/api/github", get(routes::github::overview))
        .route("/api/stats", get(routes::stats::stats))
        .route("/api/visitors", get(routes::visitors::subscribe))
        .route("/health", get(routes::health::health))
        .route("/metrics", get(metrics_handler))
        .fallback_service(site)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `GET /metrics` — Prometheus text, empty when no recorder is installed.
async fn metrics_handler(State(state): State<AppState>) -> String {
    state
        .metrics
        .as_ref()
        .map(crate::metrics::render)
        .unwrap_or_default()
}

/// Handle returned by [`start`] — keeps the serve task alive.
pub struct ServerHandle {
    /// Bound port (useful with port 0).
    pub port: u16,
    shutdown: Arc<ShutdownCoordinator>,
    server: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// The shutdown coordinator driving this server.
    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }

    /// Stop the server and wait for the serve task to drain.
    pub async fn stop(self) {
        let Self {
            shutdown, server, ..
        } = self;
        shutdown.graceful_shutdown(vec![server], None).await;
    }
}

/// Bind the listener and start serving in a background task.
pub async fn start(
    settings: Arc<FolioSettings>,
    metrics: Option<PrometheusHandle>,
) -> Result<ServerHandle, ServerError> {
    let state = AppState::new(Arc::clone(&settings), metrics)?;
    let router = build_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    let port = listener.local_addr()?.port();

    let shutdown = Arc::new(ShutdownCoordinator::new());
    let token = shutdown.token();
    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, router)
            .with_graceful_shutdown(async move { token.cancelled().await })
            .await;
    });

    info!(
        port,
        site_dir = %settings.server.site_dir,
        github_user = %settings.github.username,
        "folio server listening"
    );

    Ok(ServerHandle {
        port,
        shutdown,
        server,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
