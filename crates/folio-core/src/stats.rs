//! Aggregate portfolio stats served by the stats endpoint.

use serde::{Deserialize, Serialize};

/// Combined portfolio stats.
///
/// The fixed profile figures come from settings; `visitors` and
/// `messages_received` are live counters sampled at request time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioStats {
    /// Coding problems solved.
    pub problems_solved: u32,
    /// APIs built.
    pub apis_built: u32,
    /// Internships completed.
    pub internships: u32,
    /// Certifications earned.
    pub certifications: u32,
    /// Showcased projects.
    pub projects: u32,
    /// Visitors currently watching the site.
    pub visitors: usize,
    /// Contact messages received since startup.
    pub messages_received: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
