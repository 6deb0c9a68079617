use anyhow::Result;
use async_trait::async_trait;

use crate::errors::ConfigError;
use crate::event::PullRequestFacts;
use crate::notify::NotificationComment;
use crate::review_config::ReviewConfig;

/// Everything a run needs from the code-hosting platform.
/// Real implementation: `GitHubHost`. Test double: `MockHost`.
#[async_trait]
pub trait PullRequestHost: Send + Sync {
    /// Fails with `ConfigError::NotFound` / `ConfigError::LocalMissing` when
    /// there is no configuration at all.
    async fn fetch_config(&self) -> Result<ReviewConfig, ConfigError>;

    fn get_pull_request(&self) -> PullRequestFacts;

    async fn fetch_changed_files(&self) -> Result<Vec<String>>;

    /// Requested users, requested teams (`team:<slug>`) and users who approved.
    async fn fetch_current_reviewers(&self) -> Result<Vec<String>>;

    /// Whether one alias (user or `team:<slug>`) can access the repository.
    async fn has_access(&self, alias: &str) -> Result<bool>;

    async fn assign_reviewers(&self, reviewers: &[String]) -> Result<()>;

    async fn get_existing_notification_comment(&self) -> Result<Option<NotificationComment>>;

    /// Create, update or neutralize the notification comment.
    async fn post_notification(
        &self,
        missing_access: &[String],
        existing: Option<&NotificationComment>,
    ) -> Result<()>;
}
