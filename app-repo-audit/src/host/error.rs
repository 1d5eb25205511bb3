//! Repository host error types.

use thiserror::Error;

/// Errors returned by a [`RepositoryHost`](super::RepositoryHost).
///
/// Expected absences (a missing branch, a repository without releases, a
/// file that does not exist) are not errors; hosts report them as `None` or
/// `false`.
#[derive(Debug, Error)]
pub enum HostError {
    /// The API answered with an unexpected status.
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request did not produce an API answer (network, TLS, decoding).
    #[error("GitHub transport error: {0}")]
    Transport(#[source] octocrab::Error),

    /// A file that was expected to exist is absent.
    #[error("File '{path}' not found at '{reference}' in {repository}")]
    FileNotFound {
        repository: String,
        path: String,
        reference: String,
    },

    /// A file exists but its content could not be decoded as text.
    #[error("File '{path}' at '{reference}' in {repository} has no decodable content")]
    UndecodableContent {
        repository: String,
        path: String,
        reference: String,
    },

    /// A repository record came back without an owner.
    #[error("Repository '{repository}' has no owner")]
    MissingOwner { repository: String },
}

impl HostError {
    /// Returns true if the error is an API answer with status 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Returns true if the error means there is no content to find.
    ///
    /// Besides 404, GitHub answers 409 for any content lookup in an empty
    /// repository.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Api { status: 404 | 409, .. })
    }
}

impl From<octocrab::Error> for HostError {
    fn from(error: octocrab::Error) -> Self {
        match error {
            octocrab::Error::GitHub { source, .. } => Self::Api {
                status: source.status_code.as_u16(),
                message: source.message,
            },
            other => Self::Transport(other),
        }
    }
}
