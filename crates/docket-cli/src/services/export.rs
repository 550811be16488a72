//! Export service for fetching, filtering and reporting issues.
//!
//! This service encapsulates the fetch-filter-format pipeline behind the
//! export command, accepting a trait-based GitHub client for testability.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docket_core::{FilterCriteria, write_report};
use docket_github::{GitHubApi, Issue, RepoSlug};
use serde::Serialize;

/// Summary of a finished export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    pub repo: String,
    pub state: String,
    pub keywords: Vec<String>,
    pub issues: usize,
    pub path: PathBuf,
}

/// Service for issue exports with a trait-based GitHub client.
pub struct ExportService<'a, H: GitHubApi> {
    client: &'a H,
    repo: RepoSlug,
}

#[allow(clippy::future_not_send)]
impl<'a, H: GitHubApi> ExportService<'a, H> {
    /// Create a new export service.
    #[must_use]
    pub const fn new(client: &'a H, repo: RepoSlug) -> Self {
        Self { client, repo }
    }

    /// Fetch issues for the criteria's state and apply its keyword filter.
    pub async fn fetch_issues(&self, criteria: &FilterCriteria) -> Result<Vec<Issue>> {
        let issues = self
            .client
            .list_issues(self.repo.owner(), self.repo.name(), criteria.state)
            .await
            .with_context(|| format!("Failed to fetch issues from {}", self.repo))?;
        tracing::info!(repo = %self.repo, fetched = issues.len(), "fetched issues");

        Ok(criteria.keyword_filter().apply(issues))
    }

    /// Fill in the comments of every issue, in order.
    ///
    /// Issues reporting zero comments are not queried. `on_issue` is called
    /// once per issue after its comments are loaded.
    pub async fn load_comments(
        &self,
        issues: &mut [Issue],
        mut on_issue: impl FnMut(&Issue),
    ) -> Result<()> {
        for issue in issues.iter_mut() {
            if issue.comment_count > 0 {
                issue.comments = self
                    .client
                    .list_issue_comments(self.repo.owner(), self.repo.name(), issue.number)
                    .await
                    .with_context(|| format!("Failed to fetch comments for #{}", issue.number))?;
            }
            on_issue(issue);
        }
        Ok(())
    }

    /// Write the report for already-loaded issues.
    pub fn write(
        &self,
        path: &Path,
        issues: &[Issue],
        criteria: &FilterCriteria,
    ) -> Result<ExportResult> {
        let count = write_report(path, issues, criteria)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;

        Ok(ExportResult {
            repo: self.repo.to_string(),
            state: criteria.state.to_string(),
            keywords: criteria.keywords.clone(),
            issues: count,
            path: path.to_path_buf(),
        })
    }
}
