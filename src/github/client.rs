use anyhow::Context;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::GitHubError;
use crate::reviewers::{TEAM_PREFIX, team_slug};

const USER_AGENT: &str = concat!("autoreview/", env!("CARGO_PKG_VERSION"));
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";
const API_VERSION: &str = "2022-11-28";
const PER_PAGE: usize = 100;

/// Known GitHub token prefixes.
/// See: https://github.blog/2021-04-05-behind-githubs-new-authentication-token-formats/
const GITHUB_TOKEN_PREFIXES: &[&str] = &[
    "ghp_",        // Personal access tokens (classic)
    "github_pat_", // Fine-grained personal access tokens
    "gho_",        // OAuth access tokens
    "ghu_",        // GitHub App user-to-server tokens
    "ghs_",        // GitHub App server-to-server tokens (Actions GITHUB_TOKEN)
    "ghr_",        // GitHub App refresh tokens
];

/// Whether a string looks like a GitHub token, judged by its prefix only.
pub fn is_valid_github_token(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    GITHUB_TOKEN_PREFIXES
        .iter()
        .any(|prefix| token.starts_with(prefix))
}

/// One entry of `GET /repos/{o}/{r}/pulls/{n}/files`.
#[derive(Debug, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct Account {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct Team {
    pub slug: String,
}

/// Response of `GET /repos/{o}/{r}/pulls/{n}/requested_reviewers`.
#[derive(Debug, Default, Deserialize)]
pub struct RequestedReviewers {
    #[serde(default)]
    pub users: Vec<Account>,
    #[serde(default)]
    pub teams: Vec<Team>,
}

/// One entry of `GET /repos/{o}/{r}/pulls/{n}/reviews`.
#[derive(Debug, Deserialize)]
pub struct Review {
    /// `null` for deleted accounts
    pub user: Option<Account>,
    pub state: String,
}

/// One entry of `GET /repos/{o}/{r}/issues/{n}/comments`.
#[derive(Debug, Deserialize)]
pub struct IssueComment {
    pub id: u64,
    pub body: Option<String>,
}

/// Body of `POST /repos/{o}/{r}/pulls/{n}/requested_reviewers`.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct ReviewRequest {
    pub reviewers: Vec<String>,
    pub team_reviewers: Vec<String>,
}

impl ReviewRequest {
    /// Split aliases into individual logins and team slugs.
    pub fn from_aliases(aliases: &[String]) -> Self {
        let mut request = Self::default();
        for alias in aliases {
            match team_slug(alias) {
                Some(slug) => request.team_reviewers.push(slug.to_string()),
                None => request.reviewers.push(alias.clone()),
            }
        }
        request
    }
}

#[derive(Debug, Serialize)]
pub struct CommentBody<'a> {
    pub body: &'a str,
}

/// Requested users, requested teams as `team:<slug>` and approving users,
/// deduplicated in that order.
pub fn collect_current_reviewers(requested: RequestedReviewers, reviews: Vec<Review>) -> Vec<String> {
    let requested_users = requested.users.into_iter().map(|user| user.login);
    let requested_teams = requested
        .teams
        .into_iter()
        .map(|team| format!("{}{}", TEAM_PREFIX, team.slug));
    let approvers = reviews
        .into_iter()
        .filter(|review| review.state == "APPROVED")
        .filter_map(|review| review.user.map(|user| user.login));

    let mut reviewers: Vec<String> = Vec::new();
    for alias in requested_users.chain(requested_teams).chain(approvers) {
        if !reviewers.contains(&alias) {
            reviewers.push(alias);
        }
    }
    reviewers
}

/// Thin authenticated wrapper over the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.request_as(method, path, JSON_MEDIA_TYPE)
    }

    fn request_as(&self, method: reqwest::Method, path: &str, accept: &'static str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .bearer_auth(&self.token)
            .header(ACCEPT, HeaderValue::from_static(accept))
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Response, GitHubError> {
        debug!(endpoint = path, "GitHub API request");
        request.send().await.map_err(|source| GitHubError::Request {
            endpoint: path.to_string(),
            source,
        })
    }

    fn ensure_success(path: &str, response: Response) -> Result<Response, GitHubError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(GitHubError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            })
        }
    }

    async fn read_json<T: DeserializeOwned>(path: &str, response: Response) -> anyhow::Result<T> {
        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response from GitHub API {}", path))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let response = self
            .send(path, self.request(reqwest::Method::GET, path))
            .await?;
        let response = Self::ensure_success(path, response)?;
        Self::read_json(path, response).await
    }

    /// Follow `page` numbers until a page comes back shorter than `per_page`.
    pub async fn get_paginated<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let request = self
                .request(reqwest::Method::GET, path)
                .query(&[("per_page", PER_PAGE.to_string()), ("page", page.to_string())]);
            let response = self.send(path, request).await?;
            let response = Self::ensure_success(path, response)?;
            let batch: Vec<T> = Self::read_json(path, response).await?;

            let count = batch.len();
            items.extend(batch);
            if count < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    /// Raw file content at `git_ref`, or `None` when the file does not exist.
    pub async fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        file_path: &str,
        git_ref: &str,
    ) -> anyhow::Result<Option<String>> {
        let path = format!(
            "repos/{}/{}/contents/{}",
            owner,
            repo,
            file_path.trim_start_matches('/')
        );
        let request = self
            .request_as(reqwest::Method::GET, &path, RAW_MEDIA_TYPE)
            .query(&[("ref", git_ref)]);
        let response = self.send(&path, request).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::ensure_success(&path, response)?;
        let content = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from GitHub API {}", path))?;
        Ok(Some(content))
    }

    /// `true` on any 2xx, `false` on 404, error otherwise.
    pub async fn exists(&self, path: &str) -> anyhow::Result<bool> {
        let response = self
            .send(path, self.request(reqwest::Method::GET, path))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        Self::ensure_success(path, response)?;
        Ok(true)
    }

    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> anyhow::Result<()> {
        let request = self.request(reqwest::Method::POST, path).json(body);
        let response = self.send(path, request).await?;
        Self::ensure_success(path, response)?;
        Ok(())
    }

    pub async fn patch_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> anyhow::Result<()> {
        let request = self.request(reqwest::Method::PATCH, path).json(body);
        let response = self.send(path, request).await?;
        Self::ensure_success(path, response)?;
        Ok(())
    }
}
