//! CLI for the app repository audit.
//!
//! Prints a plain text report of release metadata, LTS branches and missing
//! workflow templates for an organization's app repositories.

use app_repo_audit::{RunSummary, Runner, RunnerConfig, RunnerError};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// App Repository Audit - Report versions, releases and missing workflows of app repositories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Repositories to audit. When omitted, every public repository of the
    /// organization with an app manifest is audited.
    repositories: Vec<String>,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Path to a TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Organization to audit (overrides the settings file).
    #[arg(long)]
    organization: Option<String>,

    /// Long-term-support branch to check (overrides the settings file).
    #[arg(long)]
    lts_branch: Option<String>,

    /// GitHub API base URL, for GitHub Enterprise.
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Several rustls providers can end up in the dependency graph; pick one.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Logs go to stderr so they never interleave with the report on stdout.
/// The level is taken from `RUST_LOG` and defaults to "info".
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let mut config = RunnerConfig::new(args.token, args.repositories);
    if let Some(path) = args.config {
        config = config.with_settings_path(path);
    }
    if let Some(organization) = args.organization {
        config = config.with_organization(organization);
    }
    if let Some(lts_branch) = args.lts_branch {
        config = config.with_lts_branch(lts_branch);
    }
    if let Some(api_url) = args.api_url {
        config = config.with_api_url(api_url);
    }

    let runner = Runner::new(config)?;
    let mut stdout = std::io::stdout();
    runner.run(&mut stdout).await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!("  Workflow templates: {}", summary.workflow_templates);
    println!("  Repositories audited: {}", summary.repositories_audited);
    println!("  Missing LTS branch: {}", summary.missing_lts_branches);
    println!("  Without release: {}", summary.without_release);
    println!("  With newer pre-release: {}", summary.with_newer_release);

    if summary.workflows_complete() {
        println!("  All workflow templates present");
    } else {
        println!(
            "  Missing workflows: {} in {} repositories",
            summary.missing_workflows, summary.repositories_missing_workflows
        );
    }
}
