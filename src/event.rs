//! Pull-request facts from the GitHub Actions event payload.

use serde::Deserialize;
use std::path::Path;

use crate::errors::EventError;

/// Pull-request facts read once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestFacts {
    pub number: u64,
    pub title: String,
    pub is_draft: bool,
    pub author: String,
    pub head_ref: String,
}

/// Owner and name of the repository the pull request targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoordinates {
    pub owner: String,
    pub name: String,
}

impl std::fmt::Display for RepoCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestPayload>,
    repository: RepositoryPayload,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
    title: String,
    #[serde(default)]
    draft: bool,
    user: Account,
    head: HeadPayload,
}

#[derive(Debug, Deserialize)]
struct HeadPayload {
    #[serde(rename = "ref")]
    git_ref: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    name: String,
    owner: Account,
}

#[derive(Debug, Deserialize)]
struct Account {
    login: String,
}

/// A parsed pull-request event.
#[derive(Debug, Clone)]
pub struct PullRequestEvent {
    pub pull_request: PullRequestFacts,
    pub repository: RepoCoordinates,
}

impl PullRequestEvent {
    pub fn load(path: &Path) -> Result<Self, EventError> {
        let content = std::fs::read_to_string(path).map_err(|source| EventError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, EventError> {
        let payload: EventPayload = serde_json::from_str(content).map_err(EventError::Parse)?;
        let pr = payload.pull_request.ok_or(EventError::NotPullRequest)?;
        Ok(Self {
            pull_request: PullRequestFacts {
                number: pr.number,
                title: pr.title,
                is_draft: pr.draft,
                author: pr.user.login,
                head_ref: pr.head.git_ref,
            },
            repository: RepoCoordinates {
                owner: payload.repository.owner.login,
                name: payload.repository.name,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PR_EVENT: &str = r#"{
        "action": "opened",
        "number": 42,
        "pull_request": {
            "number": 42,
            "title": "Add mushroom kingdom map",
            "draft": true,
            "user": {"login": "luigi", "id": 2},
            "head": {"ref": "feature/map", "sha": "abc123"},
            "base": {"ref": "main", "sha": "def456"}
        },
        "repository": {
            "name": "castle",
            "full_name": "nintendo/castle",
            "owner": {"login": "nintendo"}
        }
    }"#;

    #[test]
    fn test_parse_pull_request_event() {
        let event = PullRequestEvent::parse(PR_EVENT).unwrap();
        assert_eq!(event.pull_request.number, 42);
        assert_eq!(event.pull_request.title, "Add mushroom kingdom map");
        assert!(event.pull_request.is_draft);
        assert_eq!(event.pull_request.author, "luigi");
        assert_eq!(event.pull_request.head_ref, "feature/map");
        assert_eq!(event.repository.to_string(), "nintendo/castle");
    }

    #[test]
    fn test_draft_defaults_to_false() {
        let json = PR_EVENT.replace(r#""draft": true,"#, "");
        let event = PullRequestEvent::parse(&json).unwrap();
        assert!(!event.pull_request.is_draft);
    }

    #[test]
    fn test_non_pull_request_event() {
        let json = r#"{"ref": "refs/heads/main", "repository": {"name": "castle", "owner": {"login": "nintendo"}}}"#;
        assert!(matches!(
            PullRequestEvent::parse(json),
            Err(EventError::NotPullRequest)
        ));
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(
            PullRequestEvent::parse("not json"),
            Err(EventError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PullRequestEvent::load(&dir.path().join("event.json"));
        assert!(matches!(result, Err(EventError::Read { .. })));
    }
}
