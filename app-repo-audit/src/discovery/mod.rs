//! Resolution of the workflow templates and repositories to audit.
//!
//! Templates are listed from the organization's template repository.
//! Repositories are either named explicitly or discovered from the public
//! repositories of the organization that carry an app manifest.

mod error;

pub use error::DiscoveryError;

use crate::config::AuditSettings;
use crate::host::{DirectoryEntry, HostError, RepositoryHost, RepositoryRecord};
use tracing::{debug, info, info_span, Instrument};

/// Lists the workflow templates every app repository is expected to carry.
///
/// # Returns
///
/// Template file names ending in the configured suffix, sorted ascending.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if the template directory cannot be listed.
pub async fn resolve_workflow_templates<H>(
    host: &H,
    settings: &AuditSettings,
) -> Result<Vec<String>, DiscoveryError>
where
    H: RepositoryHost + ?Sized,
{
    let source = &settings.templates;
    let span = info_span!(
        "templates",
        repository = %source.repository,
        path = %source.path,
        branch = %source.branch
    );

    async {
        let entries = host
            .list_directory(
                &settings.organization,
                &source.repository,
                &source.path,
                &source.branch,
            )
            .await?;

        let templates = select_templates(entries, &source.suffix);
        info!(count = templates.len(), "Resolved workflow templates");
        Ok(templates)
    }
    .instrument(span)
    .await
}

/// Resolves the repositories to audit.
///
/// With a non-empty `explicit` list each named repository of the organization
/// is fetched directly. Otherwise every public repository of the organization
/// is listed and only those with a manifest on one of the default branches
/// are kept.
///
/// # Returns
///
/// Repositories sorted ascending by name.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if any lookup fails, including an unknown
/// explicitly named repository.
pub async fn resolve_repositories<H>(
    host: &H,
    settings: &AuditSettings,
    explicit: &[String],
) -> Result<Vec<RepositoryRecord>, DiscoveryError>
where
    H: RepositoryHost + ?Sized,
{
    let span = info_span!(
        "discover",
        organization = %settings.organization,
        explicit = explicit.len()
    );

    async {
        let mut repositories = if explicit.is_empty() {
            discover_app_repositories(host, settings).await?
        } else {
            let mut repositories = Vec::with_capacity(explicit.len());
            for name in explicit {
                repositories.push(host.get_repository(&settings.organization, name).await?);
            }
            repositories
        };

        sort_repositories(&mut repositories);
        info!(count = repositories.len(), "Resolved repositories");
        Ok(repositories)
    }
    .instrument(span)
    .await
}

/// Lists public organization repositories that carry an app manifest.
async fn discover_app_repositories<H>(
    host: &H,
    settings: &AuditSettings,
) -> Result<Vec<RepositoryRecord>, DiscoveryError>
where
    H: RepositoryHost + ?Sized,
{
    let candidates = host.list_org_repositories(&settings.organization).await?;
    info!(count = candidates.len(), "Listed public repositories");

    let mut apps = Vec::new();
    for repo in candidates {
        if exists_on_default_branch(host, settings, &repo, &settings.manifest_path).await? {
            apps.push(repo);
        } else {
            debug!(repo = %repo.full_name(), "No manifest, skipping");
        }
    }
    Ok(apps)
}

/// Returns whether `path` exists on any of the configured default branches.
///
/// Branches are checked in order and checking stops at the first hit.
///
/// # Errors
///
/// Returns [`HostError`] if a lookup fails for a reason other than absence.
pub async fn exists_on_default_branch<H>(
    host: &H,
    settings: &AuditSettings,
    repo: &RepositoryRecord,
    path: &str,
) -> Result<bool, HostError>
where
    H: RepositoryHost + ?Sized,
{
    for branch in &settings.default_branches {
        if host.file_exists(&repo.owner, &repo.name, path, branch).await? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Keeps the entries whose name ends with `suffix` and sorts them by name.
fn select_templates(entries: Vec<DirectoryEntry>, suffix: &str) -> Vec<String> {
    let mut names: Vec<String> = entries
        .into_iter()
        .map(|entry| entry.name)
        .filter(|name| name.ends_with(suffix))
        .collect();
    names.sort();
    names
}

/// Sorts repositories ascending by name.
fn sort_repositories(repositories: &mut [RepositoryRecord]) {
    repositories.sort_by(|a, b| a.name.cmp(&b.name));
}
