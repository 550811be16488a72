//! Trait abstractions for GitHub API operations.
//!
//! This module defines the `GitHubApi` trait which abstracts the issue
//! endpoints docket reads from, enabling dependency injection and testability.

use crate::{Comment, Issue, Result, StateFilter};

/// Trait for GitHub API operations.
///
/// This trait abstracts GitHub API calls, allowing for:
/// - Dependency injection in services
/// - Mock implementations for testing
///
/// All methods take `owner` and `repo` as parameters to support
/// operations across different repositories.
pub trait GitHubApi: Send + Sync {
    /// List every issue of a repository matching the state selector.
    ///
    /// Returned issues carry no comments; use [`GitHubApi::list_issue_comments`].
    fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        state: StateFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Issue>>> + Send;

    /// List the comments on an issue, in the order GitHub returns them.
    fn list_issue_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> impl std::future::Future<Output = Result<Vec<Comment>>> + Send;
}
