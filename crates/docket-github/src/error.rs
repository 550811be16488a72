//! Error types for docket-github.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Authentication failed or token rejected.
    #[error("GitHub authentication failed - check the configured token, GITHUB_TOKEN or `gh auth login`")]
    AuthenticationFailed,

    /// Token not found.
    #[error("no GitHub token found - set github.token in docket.toml, GITHUB_TOKEN, or run `gh auth login`")]
    NoToken,

    /// API rate limit exceeded.
    #[error("GitHub API rate limit exceeded - wait and try again")]
    RateLimited,

    /// Repository not found or no access.
    #[error("repository not found or no access: {0}")]
    RepoNotFound(String),

    /// Repository identifier is not of the form `owner/name`.
    #[error("invalid repository '{0}' - expected owner/name")]
    InvalidRepo(String),

    /// Unknown issue state selector.
    #[error("invalid state '{0}' - expected open, closed or all")]
    InvalidState(String),

    /// API error with status code.
    #[error("GitHub API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Network error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("failed to parse GitHub response: {0}")]
    Parse(#[from] serde_json::Error),

    /// IO error (e.g., reading gh CLI token).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
