//! # folio-github
//!
//! Outbound client for the GitHub public API, backing the `/api/github`
//! proxy endpoint: fetches a user's profile and recently-updated repos,
//! filters out forks, and shapes the result for the frontend widget.

#![deny(unsafe_code)]

pub mod client;
pub mod types;

pub use client::{GithubClient, GithubError, GithubResult};
pub use types::{GithubOverview, RepoSummary, UserSummary};
