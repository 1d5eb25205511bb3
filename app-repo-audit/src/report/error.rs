//! Report error types.

use crate::host::HostError;
use crate::manifest::ManifestError;
use thiserror::Error;

/// Errors that abort the report of a repository.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Repository host error.
    #[error(transparent)]
    Host(#[from] HostError),

    /// A manifest could not be parsed.
    #[error("Invalid manifest in {repository} at '{reference}': {source}")]
    Manifest {
        repository: String,
        reference: String,
        #[source]
        source: ManifestError,
    },

    /// Writing the report failed.
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
