//! `docket merge` command - concatenate a directory tree into one file.

use std::cell::OnceCell;
use std::path::PathBuf;

use anyhow::{Context, Result};
use docket_core::{Config, MergeOutcome, MergePlan};
use inquire::Confirm;
use serde::Serialize;

use crate::output;
use crate::services::MergeService;

/// Options for the merge command, as given on the command line.
#[derive(Debug)]
pub struct MergeOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub extension: Option<String>,
    pub confirm: bool,
    pub json: bool,
}

/// JSON output for merge command.
#[derive(Debug, Serialize)]
struct MergeJsonOutput {
    output: PathBuf,
    files: Vec<PathBuf>,
    expected_bytes: u64,
    actual_bytes: u64,
    consistent: bool,
}

/// Run the merge command.
pub fn run(config: &Config, options: MergeOptions) -> Result<()> {
    let extension = options
        .extension
        .as_deref()
        .unwrap_or(&config.merge.extension);
    let service = MergeService::new(extension);

    // Created only once the plan is confirmed so it never draws over the prompt.
    let bar = OnceCell::new();
    let mut merged_files = Vec::new();
    let outcome = service.run(
        &options.input_dir,
        &options.output_dir,
        |plan| {
            if !options.json {
                print_plan(plan);
            }
            let confirmed = !options.confirm || confirm_merge(plan)?;
            if confirmed {
                bar.get_or_init(|| {
                    output::progress(plan.files().len() as u64, "Merging", options.json)
                });
            }
            Ok(confirmed)
        },
        |file| {
            merged_files.push(file.path.clone());
            if let Some(pb) = bar.get() {
                pb.inc(1);
            }
        },
    )?;
    if let Some(pb) = bar.get() {
        pb.finish_and_clear();
    }

    let Some(outcome) = outcome else {
        output::info("Merge cancelled");
        return Ok(());
    };

    if options.json {
        return print_json(merged_files, &outcome);
    }

    output::info(&format!("Merged file path: {}", outcome.output.display()));
    if outcome.is_consistent() {
        output::success(&format!(
            "The merge was successful! ({} file(s), {})",
            outcome.files_merged,
            output::bytes(outcome.actual_len)
        ));
    } else {
        output::warn(&format!(
            "The merge was not successful! original length: {}, merged length: {}",
            outcome.expected_len, outcome.actual_len
        ));
    }

    Ok(())
}

/// List the collected files in visit order.
fn print_plan(plan: &MergePlan) {
    for file in plan.files() {
        output::detail(&file.path.display().to_string());
    }
    output::info(&format!(
        "Collected {} file(s), {}",
        plan.files().len(),
        output::bytes(plan.total_len())
    ));
}

/// Confirm merge with user.
fn confirm_merge(plan: &MergePlan) -> Result<bool> {
    Confirm::new(&format!(
        "Write {} file(s) into {}?",
        plan.files().len(),
        plan.output().display()
    ))
    .with_default(true)
    .prompt()
    .context("Confirmation cancelled")
}

/// Print merge result as JSON.
fn print_json(files: Vec<PathBuf>, outcome: &MergeOutcome) -> Result<()> {
    let json = MergeJsonOutput {
        output: outcome.output.clone(),
        files,
        expected_bytes: outcome.expected_len,
        actual_bytes: outcome.actual_len,
        consistent: outcome.is_consistent(),
    };
    output::essential(&serde_json::to_string_pretty(&json)?);
    Ok(())
}
