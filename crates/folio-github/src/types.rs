//! Wire types for the GitHub API and the shaped widget payload.

use serde::{Deserialize, Serialize};

/// GitHub user profile as returned by `GET /users/{username}`.
///
/// Only the fields the widget consumes are deserialized; the rest of the
/// upstream payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubUser {
    /// Account login.
    #[serde(default)]
    pub login: String,
    /// Display name.
    pub name: Option<String>,
    /// Profile bio.
    pub bio: Option<String>,
    /// Follower count.
    #[serde(default)]
    pub followers: u64,
    /// Following count.
    #[serde(default)]
    pub following: u64,
    /// Public repo count.
    #[serde(default)]
    pub public_repos: u64,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: String,
    /// Profile page URL.
    #[serde(default)]
    pub html_url: String,
}

/// GitHub repo as returned by `GET /users/{username}/repos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubRepo {
    /// Repo name.
    #[serde(default)]
    pub name: String,
    /// Repo description.
    pub description: Option<String>,
    /// Repo page URL.
    #[serde(default)]
    pub html_url: String,
    /// Star count.
    #[serde(default)]
    pub stargazers_count: u64,
    /// Fork count.
    #[serde(default)]
    pub forks_count: u64,
    /// Primary language.
    pub language: Option<String>,
    /// Last update time (RFC 3339).
    pub updated_at: Option<String>,
    /// Whether the repo is a fork.
    #[serde(default)]
    pub fork: bool,
}

/// Profile summary shaped for the frontend widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Account login.
    pub login: String,
    /// Display name.
    pub name: Option<String>,
    /// Profile bio.
    pub bio: Option<String>,
    /// Follower count.
    pub followers: u64,
    /// Following count.
    pub following: u64,
    /// Public repo count.
    pub public_repos: u64,
    /// Avatar image URL.
    pub avatar_url: String,
    /// Profile page URL.
    pub html_url: String,
}

impl From<GithubUser> for UserSummary {
    fn from(user: GithubUser) -> Self {
        Self {
            login: user.login,
            name: user.name,
            bio: user.bio,
            followers: user.followers,
            following: user.following,
            public_repos: user.public_repos,
            avatar_url: user.avatar_url,
            html_url: user.html_url,
        }
    }
}

/// Repo summary shaped for the frontend widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    /// Repo name.
    pub name: String,
    /// Repo description.
    pub description: Option<String>,
    /// Repo page URL.
    pub url: String,
    /// Star count.
    pub stars: u64,
    /// Fork count.
    pub forks: u64,
    /// Primary language.
    pub language: Option<String>,
    /// Last update time (RFC 3339).
    pub updated_at: Option<String>,
}

impl From<GithubRepo> for RepoSummary {
    fn from(repo: GithubRepo) -> Self {
        Self {
            name: repo.name,
            description: repo.description,
            url: repo.html_url,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            language: repo.language,
            updated_at: repo.updated_at,
        }
    }
}

/// Combined profile + repos payload served by the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubOverview {
    /// Shaped profile summary.
    pub user: UserSummary,
    /// Shaped non-fork repos, most recently updated first.
    pub repos: Vec<RepoSummary>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_summary_maps_all_fields() {
        let user = GithubUser {
            login: "octocat".into(),
            name: Some("The Octocat".into()),
            bio: Some("hello".into()),
            followers: 10,
            following: 2,
            public_repos: 8,
            avatar_url: "https://avatars.example/octocat.png".into(),
            html_url: "https://github.com/octocat".into(),
        };
        let summary = UserSummary::from(user);
        assert_eq!(summary.login, "octocat");
        assert_eq!(summary.name.as_deref(), Some("The Octocat"));
        assert_eq!(summary.followers, 10);
        assert_eq!(summary.public_repos, 8);
    }

    #[test]
    fn repo_summary_renames_count_fields() {
        let repo = GithubRepo {
            name: "folio".into(),
            description: None,
            html_url: "https://github.com/octocat/folio".into(),
            stargazers_count: 42,
            forks_count: 7,
            language: Some("Rust".into()),
            updated_at: Some("2026-08-01T00:00:00Z".into()),
            fork: false,
        };
        let summary = RepoSummary::from(repo);
        assert_eq!(summary.stars, 42);
        assert_eq!(summary.forks, 7);
        assert_eq!(summary.url, "https://github.com/octocat/folio");
    }

    #[test]
    fn upstream_user_tolerates_missing_fields() {
        let user: GithubUser = serde_json::from_str(r#"{"login": "octocat"}"#).unwrap();
        assert_eq!(user.login, "octocat");
        assert!(user.name.is_none());
        assert_eq!(user.followers, 0);
    }

    #[test]
    fn shaped_repo_json_keys_match_widget_contract() {
        let summary = RepoSummary {
            name: "folio".into(),
            description: Some("portfolio".into()),
            url: "https://github.com/octocat/folio".into(),
            stars: 1,
            forks: 0,
            language: None,
            updated_at: None,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("stars").is_some());
        assert!(json.get("forks").is_some());
        assert!(json.get("url").is_some());
        assert!(json.get("stargazers_count").is_none());
    }
}
