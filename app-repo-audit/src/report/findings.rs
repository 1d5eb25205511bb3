//! What the audit found for a single repository.

use crate::host::ReleaseRecord;
use crate::manifest::Manifest;

/// State of the long-term-support branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LtsStatus {
    /// The branch exists; carries its manifest.
    Present(Manifest),

    /// The branch does not exist.
    Missing,
}

/// Findings for one audited repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFindings {
    /// Full repository name.
    pub repository: String,

    /// LTS branch state.
    pub lts: LtsStatus,

    /// Latest stable release, if any.
    pub latest_release: Option<ReleaseRecord>,

    /// Newest release or pre-release when it differs from the latest stable one.
    pub newer_release: Option<ReleaseRecord>,

    /// Workflow templates found on none of the default branches.
    pub missing_workflows: Vec<String>,
}
