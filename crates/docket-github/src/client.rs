//! GitHub API client.

use chrono::{DateTime, Utc};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::auth::Auth;
use crate::error::{Error, Result};
use crate::traits::GitHubApi;
use crate::types::{Comment, Issue, IssueState, StateFilter};

/// Page size requested from list endpoints (GitHub's maximum).
const PER_PAGE: usize = 100;

/// Login shown for content whose author account was deleted.
const GHOST_LOGIN: &str = "ghost";

// === Internal API response types ===

/// Internal representation of an issue from the GitHub API.
#[derive(serde::Deserialize)]
struct ApiIssue {
    number: u64,
    title: String,
    body: Option<String>,
    state: String,
    user: Option<ApiUser>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    comments: u64,
    /// Present only when the item is a pull request.
    pull_request: Option<serde_json::Value>,
}

/// Internal representation of an issue comment from the GitHub API.
#[derive(serde::Deserialize)]
struct ApiComment {
    user: Option<ApiUser>,
    body: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(serde::Deserialize)]
struct ApiUser {
    login: String,
}

fn login_of(user: Option<ApiUser>) -> String {
    user.map_or_else(|| GHOST_LOGIN.to_string(), |u| u.login)
}

impl ApiIssue {
    /// Convert API response to domain type, parsing state string.
    fn into_issue(self) -> Issue {
        let state = match self.state.as_str() {
            "open" => IssueState::Open,
            _ => IssueState::Closed,
        };

        Issue {
            number: self.number,
            title: self.title,
            body: self.body,
            state,
            author: login_of(self.user),
            created_at: self.created_at,
            comment_count: self.comments,
            is_pull_request: self.pull_request.is_some(),
            comments: Vec::new(),
        }
    }
}

impl ApiComment {
    fn into_comment(self) -> Comment {
        Comment {
            author: login_of(self.user),
            body: self.body,
            created_at: self.created_at,
        }
    }
}

/// GitHub API client.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    /// Token stored as `SecretString` for automatic zeroization on drop.
    token: SecretString,
}

impl GitHubClient {
    /// Default GitHub API URL.
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";

    /// Create a new GitHub client.
    ///
    /// # Errors
    /// Returns error if authentication fails.
    pub fn new(auth: &Auth) -> Result<Self> {
        Self::with_base_url(auth, Self::DEFAULT_API_URL)
    }

    /// Create a new GitHub client with a custom API URL (for GitHub Enterprise).
    ///
    /// # Errors
    /// Returns error if authentication fails.
    pub fn with_base_url(auth: &Auth, base_url: impl Into<String>) -> Result<Self> {
        let token = auth.resolve()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("docket-cli"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Make a GET request.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.token.expose_secret()),
            )
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// GET every page of a list endpoint.
    ///
    /// Paging stops at the first page holding fewer than [`PER_PAGE`] items.
    async fn get_all_pages<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut items = Vec::new();
        let mut page = 1_u32;

        loop {
            let batch: Vec<T> = self
                .get(&format!("{path}{separator}per_page={PER_PAGE}&page={page}"))
                .await?;
            let len = batch.len();
            items.extend(batch);
            tracing::debug!(page, len, total = items.len(), "fetched page");

            if len < PER_PAGE {
                return Ok(items);
            }
            page += 1;
        }
    }

    /// Handle API response.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.json().await?;
            return Ok(body);
        }

        // Handle error responses
        let status_code = status.as_u16();

        match status_code {
            401 => Err(Error::AuthenticationFailed),
            403 if response
                .headers()
                .get("x-ratelimit-remaining")
                .is_some_and(|v| v == "0") =>
            {
                Err(Error::RateLimited)
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(Error::ApiError {
                    status: status_code,
                    message: text,
                })
            }
        }
    }

    // === Issue Operations ===

    /// List every issue of a repository matching `state`.
    ///
    /// # Errors
    /// Returns [`Error::RepoNotFound`] if the repository does not exist or is
    /// not visible with the current token, or any other API/network error.
    pub async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        state: StateFilter,
    ) -> Result<Vec<Issue>> {
        let issues: Vec<ApiIssue> = self
            .get_all_pages(&format!("/repos/{owner}/{repo}/issues?state={state}"))
            .await
            .map_err(|e| match e {
                Error::ApiError { status: 404, .. } => Error::RepoNotFound(format!("{owner}/{repo}")),
                other => other,
            })?;

        Ok(issues.into_iter().map(ApiIssue::into_issue).collect())
    }

    /// List comments on an issue.
    ///
    /// # Errors
    /// Returns error if request fails.
    pub async fn list_issue_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<Comment>> {
        let comments: Vec<ApiComment> = self
            .get_all_pages(&format!("/repos/{owner}/{repo}/issues/{number}/comments"))
            .await?;

        Ok(comments.into_iter().map(ApiComment::into_comment).collect())
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("token", &"[redacted]")
            .finish_non_exhaustive()
    }
}

// === Trait Implementation ===

impl GitHubApi for GitHubClient {
    async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        state: StateFilter,
    ) -> Result<Vec<Issue>> {
        self.list_issues(owner, repo, state).await
    }

    async fn list_issue_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<Comment>> {
        self.list_issue_comments(owner, repo, number).await
    }
}
