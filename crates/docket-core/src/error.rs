//! Error types for docket-core.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in docket-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Merge input is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A directory could not be listed during the merge walk.
    #[error("failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file parsing error.
    #[error("failed to parse {}: {message}", file.display())]
    ConfigParse { file: PathBuf, message: String },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
