//! GitHub API types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A GitHub issue together with its comments.
///
/// The GitHub issues listing also returns pull requests; those are kept and
/// flagged with `is_pull_request`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number.
    pub number: u64,

    /// Issue title.
    pub title: String,

    /// Issue body/description.
    pub body: Option<String>,

    /// Issue state.
    pub state: IssueState,

    /// Login of the author.
    pub author: String,

    /// When the issue was opened.
    pub created_at: DateTime<Utc>,

    /// Number of comments as reported by the listing.
    pub comment_count: u64,

    /// Whether this item is a pull request.
    pub is_pull_request: bool,

    /// Comments in the order GitHub returned them.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Issue {
    /// Body text, with an absent body treated as empty.
    #[must_use]
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

/// A comment on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Login of the commenter.
    pub author: String,

    /// Comment body.
    pub body: Option<String>,

    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}

/// State of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// Issue is open.
    Open,
    /// Issue was closed.
    Closed,
}

/// Server-side state selector for listing issues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateFilter {
    /// Only open issues.
    #[default]
    Open,
    /// Only closed issues.
    Closed,
    /// Both open and closed issues.
    All,
}

impl StateFilter {
    /// Value used for the `state` query parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

impl fmt::Display for StateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "all" => Ok(Self::All),
            _ => Err(Error::InvalidState(s.to_string())),
        }
    }
}

/// A repository identifier of the form `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    /// Repository owner (user or organization).
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoSlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some((owner, name)) = trimmed.split_once('/') else {
            return Err(Error::InvalidRepo(s.to_string()));
        };

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(Error::InvalidRepo(s.to_string()));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}
