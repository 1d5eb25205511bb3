//! Orchestrates an audit run.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::config::AuditSettings;
use crate::discovery::{resolve_repositories, resolve_workflow_templates};
use crate::host::{GitHubHost, RepositoryHost};
use crate::report::report_repository;
use crate::summary::RunSummary;
use std::io::Write;
use tracing::{info, warn};

/// Runs the audit: templates, repositories, then one report block per repository.
///
/// Every step is awaited in sequence. The first unexpected failure ends the
/// run; whatever was written to the output until then stays.
pub struct Runner<H = GitHubHost> {
    settings: AuditSettings,
    repositories: Vec<String>,
    host: H,
}

impl Runner<GitHubHost> {
    /// Builds a runner talking to GitHub from the provided configuration.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let settings = config.resolve_settings()?;
        let host = GitHubHost::new(config.token(), settings.api_url.as_deref())?;
        Ok(Self::with_host(
            settings,
            config.repositories().to_vec(),
            host,
        ))
    }
}

impl<H: RepositoryHost> Runner<H> {
    /// Builds a runner over any repository host.
    pub fn with_host(settings: AuditSettings, repositories: Vec<String>, host: H) -> Self {
        Self {
            settings,
            repositories,
            host,
        }
    }

    /// Executes the full audit, writing the report to `out`.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<RunSummary, RunnerError> {
        info!(organization = %self.settings.organization, "Starting audit");

        let templates = resolve_workflow_templates(&self.host, &self.settings).await?;
        if templates.is_empty() {
            warn!("No workflow templates found, workflow checks will be skipped");
        }

        let repositories =
            resolve_repositories(&self.host, &self.settings, &self.repositories).await?;
        if repositories.is_empty() {
            warn!("No repositories to audit");
        }

        let mut summary = RunSummary::new(templates.len());
        for repo in &repositories {
            let findings =
                report_repository(&self.host, &self.settings, repo, &templates, out).await?;
            summary.record(&findings);
        }

        out.flush().map_err(crate::report::ReportError::from)?;
        info!(count = summary.repositories_audited, "Audit complete");
        Ok(summary)
    }
}
