//! Typed error hierarchy for autoreview.
//!
//! Three enums cover the three boundaries the run touches:
//! - `ConfigError`: loading and parsing the reviewer configuration
//! - `GitHubError`: REST calls against the hosting platform
//! - `EventError`: reading the pull-request event payload

use thiserror::Error;

/// Errors from loading the reviewer configuration.
///
/// `NotFound` and `LocalMissing` are soft: the orchestrator treats them as
/// "nothing to do" and ends the run successfully.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file {path} not found in the repository")]
    NotFound { path: String },

    #[error("Local configuration file {path} does not exist")]
    LocalMissing { path: std::path::PathBuf },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[source] serde_yaml::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConfigError {
    /// Whether the orchestrator should end the run quietly on this error.
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            ConfigError::NotFound { .. } | ConfigError::LocalMissing { .. }
        )
    }
}

/// Errors from the GitHub REST API.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub API {endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Request to GitHub API {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Errors from reading the pull-request event payload.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Failed to read event payload at {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse event payload: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Event payload has no pull_request; only pull request events are supported")]
    NotPullRequest,
}
