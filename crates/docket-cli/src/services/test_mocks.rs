//! Mock implementations for testing services.
//!
//! `MockGitHub` implements the `GitHubApi` trait from docket-github with
//! canned issues and comments, recording every call it receives.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{TimeZone, Utc};
use docket_github::{
    Comment, Error as GitHubError, GitHubApi, Issue, IssueState, Result as GitHubResult,
    StateFilter,
};

/// A call received by [`MockGitHub`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListIssues {
        owner: String,
        repo: String,
        state: StateFilter,
    },
    ListComments {
        number: u64,
    },
}

/// Mock implementation of `GitHubApi` for testing.
#[derive(Default)]
pub struct MockGitHub {
    pub issues: Vec<Issue>,
    pub comments: HashMap<u64, Vec<Comment>>,
    pub fail_issues_with_not_found: bool,
    pub calls: Mutex<Vec<Call>>,
}

impl MockGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.push(issue);
        self
    }

    pub fn with_comments(mut self, number: u64, comments: Vec<Comment>) -> Self {
        if let Some(issue) = self.issues.iter_mut().find(|i| i.number == number) {
            issue.comment_count = comments.len() as u64;
        }
        self.comments.insert(number, comments);
        self
    }

    pub const fn with_missing_repo(mut self) -> Self {
        self.fail_issues_with_not_found = true;
        self
    }

    #[allow(clippy::unwrap_used)]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    #[allow(clippy::unwrap_used)]
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl GitHubApi for MockGitHub {
    async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        state: StateFilter,
    ) -> GitHubResult<Vec<Issue>> {
        self.record(Call::ListIssues {
            owner: owner.to_string(),
            repo: repo.to_string(),
            state,
        });

        if self.fail_issues_with_not_found {
            return Err(GitHubError::RepoNotFound(format!("{owner}/{repo}")));
        }

        Ok(self
            .issues
            .iter()
            .filter(|i| match state {
                StateFilter::Open => i.state == IssueState::Open,
                StateFilter::Closed => i.state == IssueState::Closed,
                StateFilter::All => true,
            })
            .cloned()
            .collect())
    }

    async fn list_issue_comments(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
    ) -> GitHubResult<Vec<Comment>> {
        self.record(Call::ListComments { number });
        Ok(self.comments.get(&number).cloned().unwrap_or_default())
    }
}

/// Build an open issue with a fixed creation time.
#[allow(clippy::unwrap_used)]
pub fn issue(number: u64, title: &str, body: Option<&str>) -> Issue {
    Issue {
        number,
        title: title.to_string(),
        body: body.map(str::to_string),
        state: IssueState::Open,
        author: "octocat".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        comment_count: 0,
        is_pull_request: false,
        comments: vec![],
    }
}

/// Build a comment with a fixed creation time.
#[allow(clippy::unwrap_used)]
pub fn comment(author: &str, body: Option<&str>) -> Comment {
    Comment {
        author: author.to_string(),
        body: body.map(str::to_string),
        created_at: Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap(),
    }
}
