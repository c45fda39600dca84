//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` and `#[serde(default)]`
//! so a partial settings file only overrides the fields it names; everything
//! else keeps its compiled default.

use serde::{Deserialize, Serialize};

/// Root settings type for the folio backend.
///
/// # JSON Format
///
/// All field names are camelCase. The optional `mail` section is omitted when
/// `None`. Example:
///
/// ```json
/// {
///   "server": { "port": 8080 },
///   "github": { "username": "varshu2024" }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FolioSettings {
    /// Settings schema version.
    pub version: String,
    /// Application name.
    pub name: String,
    /// Server network settings.
    pub server: ServerSettings,
    /// GitHub proxy settings.
    pub github: GithubSettings,
    /// Fixed profile figures for the stats endpoint.
    pub profile: ProfileSettings,
    /// Optional contact-notification relay settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail: Option<MailSettings>,
}

impl Default for FolioSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            name: "folio".to_string(),
            server: ServerSettings::default(),
            github: GithubSettings::default(),
            profile: ProfileSettings::default(),
            mail: None,
        }
    }
}

impl FolioSettings {
    /// Correct invalid values instead of rejecting them.
    ///
    /// Called automatically during loading so users get corrected behavior
    /// rather than a confusing startup error.
    pub fn validate(&mut self) {
        if self.github.top_repos == 0 {
            tracing::warn!("github.topRepos is 0, correcting to 6");
            self.github.top_repos = 6;
        }
        if self.server.host.trim().is_empty() {
            tracing::warn!("server.host is blank, correcting to 0.0.0.0");
            self.server.host = "0.0.0.0".to_string();
        }
    }
}

/// Server network settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Host to bind.
    pub host: String,
    /// Port to bind (`0` for auto-assign).
    pub port: u16,
    /// Directory of static site assets.
    pub site_dir: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            site_dir: "site".into(),
        }
    }
}

/// GitHub proxy settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GithubSettings {
    /// GitHub account whose profile and repos are proxied.
    pub username: String,
    /// API base URL (overridden in tests).
    pub api_base: String,
    /// Number of repos surfaced by the proxy.
    pub top_repos: usize,
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            username: "varshu2024".into(),
            api_base: "https://api.github.com".into(),
            top_repos: 6,
        }
    }
}

/// Contact-notification relay settings.
///
/// When present, accepted contact submissions are forwarded as a JSON
/// notification to `endpoint` with an optional bearer `token`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MailSettings {
    /// Mail API endpoint URL.
    pub endpoint: String,
    /// Bearer token for the mail API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Notification recipient address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

/// Fixed profile figures shown on the stats endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileSettings {
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
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            problems_solved: 300,
            apis_built: 10,
            internships: 3,
            certifications: 9,
            projects: 3,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
