//! Docket CLI - export GitHub issues to Markdown and merge reStructuredText trees.

use anyhow::Context;
use clap::Parser;
use docket_core::Config;

mod commands;
mod logging;
mod output;
mod services;

use commands::export::ExportOptions;
use commands::merge::MergeOptions;
use commands::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    output::set_quiet(cli.quiet);

    if let Err(e) = run(cli) {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    match cli.command {
        Commands::Export {
            repo,
            state,
            keywords,
            output,
            json,
        } => commands::export::run(
            &config,
            ExportOptions {
                repo,
                state,
                keywords,
                output,
                json,
            },
        ),
        Commands::Merge {
            input_dir,
            output_dir,
            extension,
            confirm,
            json,
        } => commands::merge::run(
            &config,
            MergeOptions {
                input_dir,
                output_dir,
                extension,
                confirm,
                json,
            },
        ),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}
