#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod discovery;
pub mod host;
pub mod manifest;
pub mod report;
pub mod runner;
pub mod summary;

pub use config::{load_settings, AuditSettings, ConfigError, TemplateSource};
pub use discovery::{
    exists_on_default_branch, resolve_repositories, resolve_workflow_templates, DiscoveryError,
};
pub use host::{
    BranchRecord, DirectoryEntry, GitHubHost, HostError, ReleaseRecord, RepositoryHost,
    RepositoryRecord,
};
pub use manifest::{Compatibility, Manifest, ManifestError};
pub use report::{fetch_manifest, report_repository, LtsStatus, ReportError, RepositoryFindings};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use summary::RunSummary;
