//! Authentication handling for GitHub API.

use std::process::Command;

use secrecy::SecretString;

use crate::error::{Error, Result};

/// Environment variable checked for a token.
const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Authentication method for GitHub API.
#[derive(Debug, Clone)]
pub enum Auth {
    /// Use token from gh CLI.
    GhCli,

    /// Use token from environment variable.
    EnvVar(String),

    /// Use a specific token (e.g. from the config file).
    Token(SecretString),
}

impl Auth {
    /// Create auth from the first available method.
    ///
    /// Tries in order: `GITHUB_TOKEN` env var, gh CLI. A blank
    /// `GITHUB_TOKEN` counts as unset.
    #[must_use]
    pub fn auto() -> Self {
        Self::from_env_value(std::env::var(TOKEN_ENV_VAR).ok().as_deref())
    }

    /// Pick the env var when it holds a non-blank token, else the gh CLI.
    fn from_env_value(value: Option<&str>) -> Self {
        if value.is_some_and(|t| !t.trim().is_empty()) {
            Self::EnvVar(TOKEN_ENV_VAR.into())
        } else {
            Self::GhCli
        }
    }

    /// Prefer an explicitly configured token, falling back to [`Auth::auto`].
    #[must_use]
    pub fn from_configured(token: Option<SecretString>) -> Self {
        token.map_or_else(Self::auto, Self::Token)
    }

    /// Resolve the authentication to a token.
    ///
    /// # Errors
    /// Returns error if token cannot be obtained.
    pub fn resolve(&self) -> Result<SecretString> {
        match self {
            Self::GhCli => get_gh_token(),
            Self::EnvVar(var) => std::env::var(var)
                .ok()
                .filter(|t| !t.trim().is_empty())
                .map(SecretString::from)
                .ok_or(Error::NoToken),
            Self::Token(t) => Ok(t.clone()),
        }
    }
}

impl Default for Auth {
    fn default() -> Self {
        Self::auto()
    }
}

/// Get GitHub token from gh CLI.
///
/// A missing `gh` binary is reported as [`Error::NoToken`].
fn get_gh_token() -> Result<SecretString> {
    let output = match Command::new("gh").args(["auth", "token"]).output() {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(Error::NoToken),
        Err(e) => return Err(e.into()),
    };

    if !output.status.success() {
        return Err(Error::NoToken);
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();

    if token.is_empty() {
        return Err(Error::NoToken);
    }

    Ok(SecretString::from(token))
}
