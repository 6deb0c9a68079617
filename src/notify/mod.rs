//! Missing-access notification comment.
//!
//! One comment per pull request, found again through a hidden marker. The
//! planner compares the body it would write with the existing one and only
//! asks for an API call when something changed.

use crate::reviewers::team_slug;

/// Hidden marker identifying the notification comment.
pub const COMMENT_MARKER: &str = "<!-- autoreview:missing-access -->";

/// An existing notification comment on the pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationComment {
    pub id: u64,
    pub body: String,
}

/// What to do with the notification comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationAction {
    Create(String),
    Update { id: u64, body: String },
    Unchanged,
}

/// Whether a comment body was written by this tool.
pub fn is_notification_comment(body: &str) -> bool {
    body.contains(COMMENT_MARKER)
}

/// Render an alias as a GitHub mention; teams become `@owner/slug`.
pub fn mention(alias: &str, owner: &str) -> String {
    match team_slug(alias) {
        Some(slug) => format!("@{}/{}", owner, slug),
        None => format!("@{}", alias),
    }
}

/// Comment body listing reviewers that lack repository access.
pub fn missing_access_body(missing: &[String], owner: &str) -> String {
    let mut body = format!(
        "{}\n### Reviewers without repository access\n\n\
         These reviewers are named in the reviewer configuration but do not have \
         access to this repository, so no review was requested from them:\n\n",
        COMMENT_MARKER
    );
    for alias in missing {
        body.push_str(&format!("- {}\n", mention(alias, owner)));
    }
    body.push_str("\nGrant them access or remove them from the configuration.\n");
    body
}

/// Comment body once every reviewer has access again.
pub fn resolved_body() -> String {
    format!(
        "{}\n### Reviewers without repository access\n\n\
         All configured reviewers have access to this repository.\n",
        COMMENT_MARKER
    )
}

/// Decide how to bring the notification comment up to date.
pub fn plan_notification(
    missing: &[String],
    existing: Option<&NotificationComment>,
    owner: &str,
) -> NotificationAction {
    let body = if missing.is_empty() {
        resolved_body()
    } else {
        missing_access_body(missing, owner)
    };

    match existing {
        None if missing.is_empty() => NotificationAction::Unchanged,
        None => NotificationAction::Create(body),
        Some(comment) if comment.body.trim() == body.trim() => NotificationAction::Unchanged,
        Some(comment) => NotificationAction::Update {
            id: comment.id,
            body,
        },
    }
}
