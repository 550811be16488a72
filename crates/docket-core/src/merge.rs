//! Breadth-first directory merging.
//!
//! Merging happens in two steps so callers can inspect or confirm the plan
//! before anything is written:
//!
//! 1. [`DirectoryMerger::collect`] walks the input tree level by level and
//!    reads every file with the target extension into a [`MergePlan`].
//! 2. [`DirectoryMerger::write`] concatenates the plan into the output file
//!    and compares its size with the summed input lengths.
//!
//! The size check is informational: a mismatch is reported through
//! [`MergeOutcome::is_consistent`], never retried or rolled back.

use std::collections::{HashSet, VecDeque};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Extension merged when none is configured.
pub const DEFAULT_EXTENSION: &str = "rst";

/// Base name of the merged file; the extension is appended.
const OUTPUT_STEM: &str = "merged";

/// A collected source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Where the file was found.
    pub path: PathBuf,

    /// Raw file contents.
    pub contents: Vec<u8>,
}

/// Files collected by a walk, in visit order.
#[derive(Debug, Clone)]
pub struct MergePlan {
    files: Vec<SourceFile>,
    output: PathBuf,
}

impl MergePlan {
    /// Collected files in the order they will be written.
    #[must_use]
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Destination of the merged file.
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Sum of all input lengths in bytes.
    #[must_use]
    pub fn total_len(&self) -> u64 {
        self.files.iter().map(|f| f.contents.len() as u64).sum()
    }

    /// Whether the walk found nothing to merge.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Result of writing a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Path of the merged file.
    pub output: PathBuf,

    /// Number of files concatenated.
    pub files_merged: usize,

    /// Summed input length in bytes.
    pub expected_len: u64,

    /// Size of the output file on disk after writing.
    pub actual_len: u64,
}

impl MergeOutcome {
    /// Whether the output size equals the summed input lengths.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.expected_len == self.actual_len
    }
}

/// Merges every file with one extension below a directory into a single file.
#[derive(Debug, Clone)]
pub struct DirectoryMerger {
    extension: String,
}

impl Default for DirectoryMerger {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION)
    }
}

impl DirectoryMerger {
    /// Create a merger for `extension` (with or without the leading dot).
    #[must_use]
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Extension this merger collects, without the dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Path of the merged file inside `output_dir`.
    #[must_use]
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{OUTPUT_STEM}.{}", self.extension))
    }

    fn is_target(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(self.extension.as_str()))
            .is_some_and(|rest| rest.ends_with('.'))
    }

    /// Walk `input_dir` breadth-first and read every matching file.
    ///
    /// Within a directory, entries are visited in file-name order; files are
    /// read as they are met and subdirectories are queued, so every file at
    /// depth `n` precedes every file at depth `n + 1`. A previous merge
    /// result lying inside the tree is skipped, and a directory reached
    /// again through a symlink is walked only once.
    ///
    /// # Errors
    /// Returns error if `input_dir` is not a directory or any directory or
    /// matching file can't be read.
    pub fn collect(&self, input_dir: &Path, output_dir: &Path) -> Result<MergePlan> {
        if !input_dir.is_dir() {
            return Err(Error::NotADirectory(input_dir.to_path_buf()));
        }

        let output = self.output_path(output_dir);
        let previous_output = fs::canonicalize(&output).ok();

        let mut files = Vec::new();
        let mut queue = VecDeque::from([input_dir.to_path_buf()]);

        // Canonical paths of walked directories; a symlink back into the tree
        // resolves to one of these and is not walked again.
        let mut visited = HashSet::new();

        while let Some(dir) = queue.pop_front() {
            let canonical = fs::canonicalize(&dir).map_err(|source| Error::ReadDir {
                path: dir.clone(),
                source,
            })?;
            if !visited.insert(canonical) {
                tracing::debug!(dir = %dir.display(), "skipping already visited directory");
                continue;
            }

            for path in sorted_entries(&dir)? {
                if path.is_dir() {
                    queue.push_back(path);
                    continue;
                }

                if !self.is_target(&path) {
                    continue;
                }

                if previous_output.is_some() && fs::canonicalize(&path).ok() == previous_output {
                    tracing::debug!(path = %path.display(), "skipping previous merge output");
                    continue;
                }

                let contents = fs::read(&path).map_err(|source| Error::ReadFile {
                    path: path.clone(),
                    source,
                })?;
                tracing::debug!(path = %path.display(), len = contents.len(), "collected");
                files.push(SourceFile { path, contents });
            }
        }

        tracing::info!(files = files.len(), dir = %input_dir.display(), "collection finished");
        Ok(MergePlan { files, output })
    }

    /// Write the plan's files back to back into its output path.
    ///
    /// The output directory is created if missing and an existing output
    /// file is overwritten. `on_file` is called after each file is written.
    ///
    /// # Errors
    /// Returns error if the output can't be created or written.
    pub fn write(&self, plan: &MergePlan, mut on_file: impl FnMut(&SourceFile)) -> Result<MergeOutcome> {
        let write_err = |source| Error::WriteFile {
            path: plan.output.clone(),
            source,
        };

        if let Some(parent) = plan.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut writer = BufWriter::new(File::create(&plan.output).map_err(write_err)?);
        for file in &plan.files {
            writer.write_all(&file.contents).map_err(write_err)?;
            on_file(file);
        }
        writer.flush().map_err(write_err)?;
        drop(writer);

        let actual_len = fs::metadata(&plan.output).map_err(write_err)?.len();
        let outcome = MergeOutcome {
            output: plan.output.clone(),
            files_merged: plan.files.len(),
            expected_len: plan.total_len(),
            actual_len,
        };

        tracing::info!(
            output = %outcome.output.display(),
            expected = outcome.expected_len,
            actual = outcome.actual_len,
            "merge written"
        );

        Ok(outcome)
    }
}

/// Entries of `dir`, sorted by file name.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_err = |source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(read_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(read_err)?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}
