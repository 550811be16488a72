//! Command-line definitions and command implementations.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use docket_core::config::DEFAULT_CONFIG_FILE;
use docket_github::StateFilter;

pub mod completions;
pub mod export;
pub mod merge;

/// Docket - export GitHub issues to Markdown and merge reStructuredText trees.
#[derive(Debug, Parser)]
#[command(name = "docket", version, about, long_about = None)]
pub struct Cli {
    /// Path to the config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Only print errors and essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export GitHub issues and their comments to a Markdown report.
    Export {
        /// Repository as owner/name (defaults to github.repo in the config).
        #[arg(short, long)]
        repo: Option<String>,

        /// Issue state to fetch: open, closed or all.
        #[arg(short, long)]
        state: Option<StateFilter>,

        /// Keep only issues whose title or body contains one of these keywords.
        #[arg(short, long, num_args = 1..)]
        keywords: Vec<String>,

        /// Output file (defaults to <output_dir>/<repo>_<keywords>_<timestamp>.md).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a JSON summary instead of human-readable output.
        #[arg(long)]
        json: bool,
    },

    /// Merge every matching file below a directory, breadth-first, into one file.
    Merge {
        /// Directory to walk.
        input_dir: PathBuf,

        /// Directory receiving merged.<extension>.
        output_dir: PathBuf,

        /// Extension of the files to merge (defaults to merge.extension in the config).
        #[arg(short, long)]
        extension: Option<String>,

        /// Ask for confirmation before writing the merged file.
        #[arg(long)]
        confirm: bool,

        /// Print a JSON summary instead of human-readable output.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
