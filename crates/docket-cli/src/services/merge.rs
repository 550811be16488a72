//! Merge service for concatenating a directory tree into one file.
//!
//! Runs the collect step, asks the supplied confirmation callback, then
//! writes and verifies the merged file.

use std::path::Path;

use anyhow::{Context, Result};
use docket_core::{DirectoryMerger, MergeOutcome, MergePlan, SourceFile};

/// Service for merge operations.
pub struct MergeService {
    merger: DirectoryMerger,
}

impl MergeService {
    /// Create a new merge service for files with `extension`.
    #[must_use]
    pub fn new(extension: &str) -> Self {
        Self {
            merger: DirectoryMerger::new(extension),
        }
    }

    /// Collect the files that would be merged.
    fn plan(&self, input_dir: &Path, output_dir: &Path) -> Result<MergePlan> {
        self.merger
            .collect(input_dir, output_dir)
            .with_context(|| format!("Failed to collect files from {}", input_dir.display()))
    }

    /// Collect, confirm and write.
    ///
    /// Returns `None` without touching the output when `confirm` declines.
    pub fn run(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        confirm: impl FnOnce(&MergePlan) -> Result<bool>,
        on_file: impl FnMut(&SourceFile),
    ) -> Result<Option<MergeOutcome>> {
        let plan = self.plan(input_dir, output_dir)?;

        if !confirm(&plan)? {
            return Ok(None);
        }

        self.merger
            .write(&plan, on_file)
            .map(Some)
            .with_context(|| format!("Failed to write {}", plan.output().display()))
    }
}
