//! `GET /api/stats` — combined portfolio stats.

use axum::Json;
use axum::extract::State;
use folio_core::stats::PortfolioStats;

use crate::server::AppState;

/// Combined stats: fixed profile figures plus live counters.
pub async fn stats(State(state): State<AppState>) -> Json<serde_json::Value> {
    let profile = &state.settings.profile;
    let stats = PortfolioStats {
        problems_solved: profile.problems_solved,
        apis_built: profile.apis_built,
        internships: profile.internships,
        certifications: profile.certifications,
        projects: profile.projects,
        visitors: state.hub.visitor_count(),
        messages_received: state.inbox.len(),
    };

    Json(serde_json::json!({
        "ok": true,
        "stats": stats,
    }))
}
