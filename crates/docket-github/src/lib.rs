//! # docket-github
//!
//! GitHub API integration for Docket, providing issue and comment
//! fetching for the report exporter.
//!
//! # Security
//!
//! Authentication tokens are stored using `SecretString` which automatically
//! zeroizes memory when dropped, reducing credential exposure in memory dumps.

mod auth;
mod client;
mod error;
mod traits;
mod types;

pub use auth::Auth;
pub use client::GitHubClient;
pub use error::{Error, Result};
// Re-export SecretString for constructing Auth::Token
pub use secrecy::SecretString;
pub use traits::GitHubApi;
pub use types::{Comment, Issue, IssueState, RepoSlug, StateFilter};
