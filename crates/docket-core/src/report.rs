//! Markdown report rendering for exported issues.
//!
//! The document grammar is fixed: an H1 title, an H2 line for the state
//! filter, an optional H2 line for keywords, then one block per issue with an
//! H2 header, H3 metadata/body/comments sections and an H4 per comment.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use docket_github::{Comment, Issue, RepoSlug};

use crate::error::{Error, Result};
use crate::filter::FilterCriteria;

/// Placeholder for an issue without a body.
pub const NO_DESCRIPTION: &str = "No description provided.";

/// Placeholder for a comment without a body.
pub const NO_COMMENT_BODY: &str = "No comment provided.";

/// Line written when an issue has no comments.
pub const NO_COMMENTS: &str = "No comments.";

/// File name stem used when the repository name has no portable characters.
const FALLBACK_STEM: &str = "issues";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Render issues into the Markdown report.
#[must_use]
pub fn render(issues: &[Issue], criteria: &FilterCriteria) -> String {
    let mut out = String::new();

    out.push_str("# GitHub Issues\n\n");
    let _ = write!(out, "## State: {}\n\n", criteria.state);
    if !criteria.keywords.is_empty() {
        let _ = write!(out, "## Keywords: {}\n\n", criteria.keywords.join(", "));
    }

    for issue in issues {
        render_issue(&mut out, issue);
    }

    out
}

fn render_issue(out: &mut String, issue: &Issue) {
    let _ = write!(out, "## Issue #{}: {}\n\n", issue.number, issue.title);
    let _ = write!(out, "### Created at: {}\n\n", timestamp(&issue.created_at));
    out.push_str("### Body:\n");
    out.push_str(issue.body.as_deref().unwrap_or(NO_DESCRIPTION));
    out.push_str("\n\n");

    out.push_str("### Comments:\n\n");
    if issue.comments.is_empty() {
        out.push_str(NO_COMMENTS);
        out.push_str("\n\n");
        return;
    }

    for comment in &issue.comments {
        render_comment(out, comment);
    }
}

fn render_comment(out: &mut String, comment: &Comment) {
    let _ = write!(
        out,
        "#### {} commented at {}:\n\n",
        comment.author,
        timestamp(&comment.created_at)
    );
    out.push_str(comment.body.as_deref().unwrap_or(NO_COMMENT_BODY));
    out.push_str("\n\n");
}

/// Render issues and write the report to `path`.
///
/// Parent directories are created as needed and an existing file is
/// overwritten. Returns the number of issues written.
///
/// # Errors
/// Returns error if the directory or file can't be written.
pub fn write_report(path: &Path, issues: &[Issue], criteria: &FilterCriteria) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::WriteFile {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let document = render(issues, criteria);
    fs::write(path, document).map_err(|source| Error::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), issues = issues.len(), "wrote report");
    Ok(issues.len())
}

/// Default report location: `<dir>/<repo>[_<keywords>]_<YYYYmmddHHMMSS>.md`.
///
/// Keywords are lowercased, joined with `-` and stripped of anything outside
/// `[a-z0-9.-]` so the name stays portable. A repository name left empty by
/// that stripping is replaced with `issues`.
#[must_use]
pub fn default_report_path(
    dir: &Path,
    repo: &RepoSlug,
    keywords: &[String],
    at: DateTime<Local>,
) -> PathBuf {
    let mut name = sanitize(repo.name());
    if name.is_empty() {
        name.push_str(FALLBACK_STEM);
    }

    let keyword_part = keywords
        .iter()
        .map(|k| sanitize(k))
        .filter(|k| !k.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if !keyword_part.is_empty() {
        name.push('_');
        name.push_str(&keyword_part);
    }

    let _ = write!(name, "_{}.md", at.format("%Y%m%d%H%M%S"));
    dir.join(name)
}

fn sanitize(part: &str) -> String {
    part.to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == '_' { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '.')
        .collect::<String>()
        .trim_matches(|c: char| c == '-' || c == '.')
        .to_string()
}
