//! Per-repository audit report.
//!
//! Each repository gets a block of plain text lines: a header, the LTS
//! branch state, the latest stable release, a newer pre-release if there is
//! one, and every missing workflow template. Lines are written as soon as
//! each check completes.

mod error;
mod findings;

pub use error::ReportError;
pub use findings::{LtsStatus, RepositoryFindings};

use crate::config::AuditSettings;
use crate::discovery::exists_on_default_branch;
use crate::host::{format_timestamp, ReleaseRecord, RepositoryHost, RepositoryRecord};
use crate::manifest::Manifest;
use std::io::Write;
use tracing::{debug, info_span, Instrument};

/// Name of the platform whose compatibility range is reported.
const PLATFORM_LABEL: &str = "Nextcloud";

/// Audits one repository and writes its report block to `out`.
///
/// Only a missing LTS branch and a missing stable release are reported as
/// findings; every other failure aborts with an error after the lines
/// already written.
///
/// # Errors
///
/// Returns [`ReportError`] if a lookup fails, a manifest cannot be parsed,
/// or `out` cannot be written.
pub async fn report_repository<H, W>(
    host: &H,
    settings: &AuditSettings,
    repo: &RepositoryRecord,
    templates: &[String],
    out: &mut W,
) -> Result<RepositoryFindings, ReportError>
where
    H: RepositoryHost + ?Sized,
    W: Write,
{
    let span = info_span!("report", repo = %repo.full_name());

    async {
        writeln!(out)?;
        writeln!(out, "{}", header_line(repo))?;

        let lts = match host
            .get_branch(&repo.owner, &repo.name, &settings.lts_branch)
            .await?
        {
            Some(_) => {
                let manifest = fetch_manifest(host, settings, repo, &settings.lts_branch).await?;
                writeln!(out, "{}", lts_line(&settings.lts_branch, &manifest))?;
                LtsStatus::Present(manifest)
            }
            None => {
                writeln!(out, "* Branch {} is missing", settings.lts_branch)?;
                LtsStatus::Missing
            }
        };

        let latest_release = host.latest_release(&repo.owner, &repo.name).await?;
        match &latest_release {
            Some(release) => {
                let manifest = fetch_manifest(host, settings, repo, &release.tag_name).await?;
                writeln!(out, "{}", release_line(release, &manifest))?;
            }
            None => writeln!(out, "* No release yet")?,
        }

        let releases = host.list_releases(&repo.owner, &repo.name).await?;
        let newer_release = newer_than_latest(&releases, latest_release.as_ref()).cloned();
        if let Some(release) = &newer_release {
            debug!(tag = %release.tag_name, "Newest release differs from latest stable");
            let manifest = fetch_manifest(host, settings, repo, &release.tag_name).await?;
            writeln!(out, "{}", release_line(release, &manifest))?;
        }

        let mut missing_workflows = Vec::new();
        for template in templates {
            let path = settings.workflow_path(template);
            if !exists_on_default_branch(host, settings, repo, &path).await? {
                writeln!(out, "* {template} is missing")?;
                missing_workflows.push(template.clone());
            }
        }

        Ok(RepositoryFindings {
            repository: repo.full_name(),
            lts,
            latest_release,
            newer_release,
            missing_workflows,
        })
    }
    .instrument(span)
    .await
}

/// Downloads and parses the manifest of a repository at a reference.
///
/// # Errors
///
/// Returns [`ReportError`] if the file cannot be downloaded or parsed.
pub async fn fetch_manifest<H>(
    host: &H,
    settings: &AuditSettings,
    repo: &RepositoryRecord,
    reference: &str,
) -> Result<Manifest, ReportError>
where
    H: RepositoryHost + ?Sized,
{
    let document = host
        .download_file(&repo.owner, &repo.name, &settings.manifest_path, reference)
        .await?;

    Manifest::parse(&document).map_err(|source| ReportError::Manifest {
        repository: repo.full_name(),
        reference: reference.to_string(),
        source,
    })
}

/// Returns the newest release if its tag differs from the latest stable one.
fn newer_than_latest<'a>(
    releases: &'a [ReleaseRecord],
    latest: Option<&ReleaseRecord>,
) -> Option<&'a ReleaseRecord> {
    let newest = releases.first()?;
    let latest_tag = latest.map(|release| release.tag_name.as_str());
    (latest_tag != Some(newest.tag_name.as_str())).then_some(newest)
}

fn header_line(repo: &RepositoryRecord) -> String {
    format!(
        "# {} (Created: {}, Last push: {})",
        repo.name,
        format_timestamp(repo.created_at.as_ref()),
        format_timestamp(repo.pushed_at.as_ref())
    )
}

fn lts_line(branch: &str, manifest: &Manifest) -> String {
    format!(
        "* {branch}: version {} ({PLATFORM_LABEL} {})",
        manifest.version, manifest.compatibility
    )
}

fn release_line(release: &ReleaseRecord, manifest: &Manifest) -> String {
    format!(
        "* Last release: {} ({}) - version {} ({PLATFORM_LABEL} {})",
        release.display_name(),
        release.tag_name,
        manifest.version,
        manifest.compatibility
    )
}
