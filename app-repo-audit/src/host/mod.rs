//! Access to the repository hosting API.
//!
//! The auditor only talks to the host through [`RepositoryHost`], which
//! keeps pagination, authentication and status code handling out of the
//! report logic. [`GitHubHost`] is the production implementation.

mod error;
mod github;
mod records;

pub use error::HostError;
pub use github::GitHubHost;
pub use records::{
    format_timestamp, BranchRecord, DirectoryEntry, ReleaseRecord, RepositoryRecord,
};

use async_trait::async_trait;

/// Operations the auditor needs from a repository hosting API.
///
/// List operations return every page. Lookups of things that may legitimately
/// be absent return `Ok(None)` (or `Ok(false)`) instead of an error.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Lists a directory at a given reference.
    async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<Vec<DirectoryEntry>, HostError>;

    /// Fetches a single repository. An unknown repository is an error.
    async fn get_repository(&self, owner: &str, name: &str)
        -> Result<RepositoryRecord, HostError>;

    /// Lists every public repository of an organization.
    async fn list_org_repositories(&self, org: &str)
        -> Result<Vec<RepositoryRecord>, HostError>;

    /// Returns whether a file exists at a given reference.
    async fn file_exists(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<bool, HostError>;

    /// Downloads a text file at a given reference. A missing file is an error.
    async fn download_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<String, HostError>;

    /// Looks up a branch, returning `None` if it does not exist.
    async fn get_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Option<BranchRecord>, HostError>;

    /// Fetches the latest stable release, returning `None` if there is none.
    async fn latest_release(&self, owner: &str, repo: &str)
        -> Result<Option<ReleaseRecord>, HostError>;

    /// Lists releases and pre-releases, newest first.
    async fn list_releases(&self, owner: &str, repo: &str)
        -> Result<Vec<ReleaseRecord>, HostError>;
}
