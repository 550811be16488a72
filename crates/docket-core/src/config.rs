//! Configuration management for Docket.

use std::fs;
use std::path::{Path, PathBuf};

use docket_github::StateFilter;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "docket.toml";

/// Docket configuration loaded from `docket.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// GitHub-specific settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// Issue export settings.
    #[serde(default)]
    pub export: ExportConfig,

    /// Directory merge settings.
    #[serde(default)]
    pub merge: MergeConfig,
}

impl Config {
    /// Load config from a TOML file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// GitHub-specific settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubConfig {
    /// Access token; takes precedence over `GITHUB_TOKEN` and the gh CLI.
    #[serde(default, deserialize_with = "deserialize_token")]
    pub token: Option<SecretString>,

    /// Default repository (`owner/name`) when `--repo` is not given.
    #[serde(default)]
    pub repo: Option<String>,

    /// Custom API URL for GitHub Enterprise.
    #[serde(default)]
    pub api_url: Option<String>,
}

fn deserialize_token<'de, D>(deserializer: D) -> std::result::Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let token = Option::<String>::deserialize(deserializer)?;
    Ok(token
        .filter(|t| !t.trim().is_empty())
        .map(SecretString::from))
}

/// Issue export settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// State selector used when `--state` is not given.
    #[serde(default)]
    pub state: StateFilter,

    /// Directory for reports when `--output` is not given.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            state: StateFilter::default(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("notes")
}

/// Directory merge settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeConfig {
    /// Extension (without the dot) of the files to merge.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
        }
    }
}

fn default_extension() -> String {
    crate::merge::DEFAULT_EXTENSION.into()
}
