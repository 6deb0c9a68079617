use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::client::{
    ChangedFile, CommentBody, GitHubClient, IssueComment, RequestedReviewers, Review,
    ReviewRequest, collect_current_reviewers, is_valid_github_token,
};
use crate::errors::ConfigError;
use crate::event::{PullRequestEvent, PullRequestFacts, RepoCoordinates};
use crate::notify::{
    NotificationAction, NotificationComment, is_notification_comment, plan_notification,
};
use crate::orchestrator::PullRequestHost;
use crate::review_config::ReviewConfig;
use crate::reviewers::team_slug;
use crate::settings::RunSettings;

/// [`PullRequestHost`] backed by the GitHub REST API.
pub struct GitHubHost {
    client: GitHubClient,
    settings: RunSettings,
    event: PullRequestEvent,
}

impl GitHubHost {
    pub fn new(settings: RunSettings, event: PullRequestEvent) -> Result<Self> {
        if !is_valid_github_token(&settings.token) {
            warn!("Token does not look like a GitHub token; API calls may be rejected");
        }
        let client = GitHubClient::new(&settings.api_url, &settings.token)?;
        Ok(Self {
            client,
            settings,
            event,
        })
    }

    fn repo(&self) -> &RepoCoordinates {
        &self.event.repository
    }

    fn repo_path(&self, rest: &str) -> String {
        format!("repos/{}/{}/{}", self.repo().owner, self.repo().name, rest)
    }

    fn pull_path(&self, rest: &str) -> String {
        self.repo_path(&format!("pulls/{}/{}", self.event.pull_request.number, rest))
    }

    fn config_ref(&self) -> &str {
        self.settings
            .git_ref
            .as_deref()
            .unwrap_or(&self.event.pull_request.head_ref)
    }
}

#[async_trait]
impl PullRequestHost for GitHubHost {
    async fn fetch_config(&self) -> Result<ReviewConfig, ConfigError> {
        if self.settings.use_local {
            let path = self.settings.local_config_path();
            debug!(path = %path.display(), "reading local configuration");
            return ReviewConfig::load(&path);
        }

        let git_ref = self.config_ref();
        debug!(path = self.settings.config_path.as_str(), git_ref, "reading configuration from repository");
        let content = self
            .client
            .get_file_content(
                &self.repo().owner,
                &self.repo().name,
                &self.settings.config_path,
                git_ref,
            )
            .await?;
        match content {
            Some(content) => ReviewConfig::parse(&content),
            None => Err(ConfigError::NotFound {
                path: self.settings.config_path.clone(),
            }),
        }
    }

    fn get_pull_request(&self) -> PullRequestFacts {
        self.event.pull_request.clone()
    }

    async fn fetch_changed_files(&self) -> Result<Vec<String>> {
        let files: Vec<ChangedFile> = self.client.get_paginated(&self.pull_path("files")).await?;
        Ok(files.into_iter().map(|file| file.filename).collect())
    }

    async fn fetch_current_reviewers(&self) -> Result<Vec<String>> {
        let requested: RequestedReviewers = self
            .client
            .get_json(&self.pull_path("requested_reviewers"))
            .await?;
        let reviews: Vec<Review> = self.client.get_paginated(&self.pull_path("reviews")).await?;
        Ok(collect_current_reviewers(requested, reviews))
    }

    async fn has_access(&self, alias: &str) -> Result<bool> {
        let RepoCoordinates { owner, name } = self.repo();
        let path = match team_slug(alias) {
            Some(slug) => format!("orgs/{}/teams/{}/repos/{}/{}", owner, slug, owner, name),
            None => self.repo_path(&format!("collaborators/{}", alias)),
        };
        self.client.exists(&path).await
    }

    async fn assign_reviewers(&self, reviewers: &[String]) -> Result<()> {
        let request = ReviewRequest::from_aliases(reviewers);
        self.client
            .post_json(&self.pull_path("requested_reviewers"), &request)
            .await
    }

    async fn get_existing_notification_comment(&self) -> Result<Option<NotificationComment>> {
        let path = self.repo_path(&format!("issues/{}/comments", self.event.pull_request.number));
        let comments: Vec<IssueComment> = self.client.get_paginated(&path).await?;
        Ok(comments.into_iter().find_map(|comment| {
            let body = comment.body?;
            is_notification_comment(&body).then_some(NotificationComment {
                id: comment.id,
                body,
            })
        }))
    }

    async fn post_notification(
        &self,
        missing_access: &[String],
        existing: Option<&NotificationComment>,
    ) -> Result<()> {
        match plan_notification(missing_access, existing, &self.repo().owner) {
            NotificationAction::Create(body) => {
                info!("Posting missing-access notification");
                let path =
                    self.repo_path(&format!("issues/{}/comments", self.event.pull_request.number));
                self.client.post_json(&path, &CommentBody { body: &body }).await
            }
            NotificationAction::Update { id, body } => {
                info!(comment_id = id, "Updating missing-access notification");
                let path = self.repo_path(&format!("issues/comments/{}", id));
                self.client.patch_json(&path, &CommentBody { body: &body }).await
            }
            NotificationAction::Unchanged => {
                debug!("Notification comment already up to date");
                Ok(())
            }
        }
    }
}
