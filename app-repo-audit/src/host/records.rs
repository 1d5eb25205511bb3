//! Records exchanged with a repository host.

use chrono::{DateTime, SecondsFormat, Utc};

/// A repository as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRecord {
    /// Owner login (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// When the repository was created.
    pub created_at: Option<DateTime<Utc>>,

    /// When something was last pushed to the repository.
    pub pushed_at: Option<DateTime<Utc>>,
}

impl RepositoryRecord {
    /// Full repository name in "owner/name" format.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Formats an optional timestamp the way the GitHub API prints it.
pub fn format_timestamp(timestamp: Option<&DateTime<Utc>>) -> String {
    timestamp.map_or_else(
        || "unknown".to_string(),
        |t| t.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}

/// A release or pre-release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRecord {
    /// Tag the release points at.
    pub tag_name: String,

    /// Display name, if one was set.
    pub name: Option<String>,

    /// Whether the release is marked as a pre-release.
    pub prerelease: bool,
}

impl ReleaseRecord {
    /// Name shown in the report, falling back to the tag.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.tag_name,
        }
    }
}

/// An entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// File or directory name.
    pub name: String,

    /// Path relative to the repository root.
    pub path: String,

    /// Entry kind as reported by the host ("file", "dir", "symlink", "submodule").
    pub kind: String,
}

/// A branch that exists in a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRecord {
    /// Branch name.
    pub name: String,
}
