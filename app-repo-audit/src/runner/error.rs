//! Runner error types.

/// Errors that abort an audit run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Settings loading and validation errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Template or repository resolution errors.
    #[error(transparent)]
    Discovery(#[from] crate::discovery::DiscoveryError),

    /// Errors while reporting a repository.
    #[error(transparent)]
    Report(#[from] crate::report::ReportError),
}
