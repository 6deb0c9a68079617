//! GitHub REST integration.
//!
//! [`GitHubClient`] handles authentication, pagination and status mapping.
//! [`GitHubHost`] maps the orchestrator's [`PullRequestHost`](crate::orchestrator::PullRequestHost)
//! operations onto REST endpoints for the repository in the event payload.

pub mod client;
pub mod host;

pub use client::{GitHubClient, is_valid_github_token};
pub use host::GitHubHost;
