//! Keyword filtering of fetched issues.

use docket_github::{Issue, StateFilter};

/// The filter an export was run with, kept for the report header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Server-side state selector.
    pub state: StateFilter,

    /// Keywords as given on the command line.
    pub keywords: Vec<String>,
}

impl FilterCriteria {
    /// Build the local keyword predicate for these criteria.
    #[must_use]
    pub fn keyword_filter(&self) -> KeywordFilter {
        KeywordFilter::new(&self.keywords)
    }
}

/// Case-insensitive keyword predicate over issue title and body.
///
/// An issue matches when at least one keyword is a substring of its title or
/// its body (an absent body counts as empty). A filter without keywords
/// matches every issue.
#[derive(Debug, Clone, Default)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    /// Create a filter from raw keywords.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Whether the filter lets everything through.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Check whether an issue passes the filter.
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        if self.keywords.is_empty() {
            return true;
        }

        let title = issue.title.to_lowercase();
        let body = issue.body_text().to_lowercase();
        self.keywords
            .iter()
            .any(|k| title.contains(k.as_str()) || body.contains(k.as_str()))
    }

    /// Keep only matching issues, preserving fetch order.
    #[must_use]
    pub fn apply(&self, issues: Vec<Issue>) -> Vec<Issue> {
        if self.is_empty() {
            return issues;
        }

        let before = issues.len();
        let kept: Vec<Issue> = issues.into_iter().filter(|i| self.matches(i)).collect();
        tracing::debug!(before, after = kept.len(), "applied keyword filter");
        kept
    }
}
