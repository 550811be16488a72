//! `docket export` command - write GitHub issues and comments to Markdown.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use docket_core::{Config, FilterCriteria, default_report_path};
use docket_github::{Auth, GitHubClient, RepoSlug, StateFilter};

use crate::output;
use crate::services::{ExportResult, ExportService};

/// Options for the export command, as given on the command line.
#[derive(Debug)]
pub struct ExportOptions {
    pub repo: Option<String>,
    pub state: Option<StateFilter>,
    pub keywords: Vec<String>,
    pub output: Option<PathBuf>,
    pub json: bool,
}

/// Run the export command.
pub fn run(config: &Config, options: ExportOptions) -> Result<()> {
    let repo = resolve_repo(options.repo.as_deref(), config)?;
    let criteria = FilterCriteria {
        state: options.state.unwrap_or(config.export.state),
        keywords: options.keywords,
    };
    let path = options.output.unwrap_or_else(|| {
        default_report_path(
            &config.export.output_dir,
            &repo,
            &criteria.keywords,
            chrono::Local::now(),
        )
    });

    let auth = Auth::from_configured(config.github.token.clone());
    let client = match config.github.api_url.as_deref() {
        Some(url) => GitHubClient::with_base_url(&auth, url),
        None => GitHubClient::new(&auth),
    }
    .context("Failed to authenticate with GitHub")?;

    let rt = tokio::runtime::Runtime::new()?;
    let service = ExportService::new(&client, repo.clone());

    if !options.json {
        output::info(&format!("Fetching {} issues from {repo}...", criteria.state));
    }
    let mut issues = rt.block_on(service.fetch_issues(&criteria))?;

    let pb = output::progress(issues.len() as u64, "Comments", options.json);
    rt.block_on(service.load_comments(&mut issues, |_| pb.inc(1)))?;
    pb.finish_and_clear();

    let result = service.write(&path, &issues, &criteria)?;

    if options.json {
        print_json(&result)
    } else {
        output::success(&format!(
            "{} issues and their comments have been saved to {}.",
            result.issues,
            result.path.display()
        ));
        Ok(())
    }
}

/// Pick the repository from the flag, falling back to the config.
fn resolve_repo(flag: Option<&str>, config: &Config) -> Result<RepoSlug> {
    let raw = flag
        .or(config.github.repo.as_deref())
        .ok_or_else(|| anyhow!("No repository given - pass --repo owner/name or set github.repo in the config"))?;

    Ok(raw.parse()?)
}

/// Print export result as JSON.
fn print_json(result: &ExportResult) -> Result<()> {
    let json_output = serde_json::to_string_pretty(result)?;
    output::essential(&json_output);
    Ok(())
}
