//! Repository discovery error types.

use crate::host::HostError;
use thiserror::Error;

/// Errors that can occur while resolving templates or repositories.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Repository host error.
    #[error(transparent)]
    Host(#[from] HostError),
}
