//! In-memory repository host used by the integration tests.

#![allow(dead_code)]

use app_repo_audit::{
    BranchRecord, DirectoryEntry, HostError, ReleaseRecord, RepositoryHost, RepositoryRecord,
};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub const ORG: &str = "nextcloud";

/// Renders the manifest fixture with the given version and platform range.
pub fn info_xml(version: &str, min: &str, max: &str) -> String {
    include_str!("../fixtures/info.xml")
        .replace("{{version}}", version)
        .replace("{{min}}", min)
        .replace("{{max}}", max)
}

pub fn repository(name: &str) -> RepositoryRecord {
    RepositoryRecord {
        owner: ORG.to_string(),
        name: name.to_string(),
        created_at: Some(Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap()),
        pushed_at: Some(Utc.with_ymd_and_hms(2024, 6, 7, 8, 9, 10).unwrap()),
    }
}

pub fn release(tag: &str, name: &str, prerelease: bool) -> ReleaseRecord {
    ReleaseRecord {
        tag_name: tag.to_string(),
        name: Some(name.to_string()),
        prerelease,
    }
}

fn not_found() -> HostError {
    HostError::Api {
        status: 404,
        message: "Not Found".to_string(),
    }
}

/// Repository host backed by maps, recording every call it receives.
#[derive(Default)]
pub struct FakeHost {
    org_repositories: Vec<RepositoryRecord>,
    repositories: HashMap<String, RepositoryRecord>,
    directories: HashMap<(String, String, String), Vec<DirectoryEntry>>,
    files: HashMap<(String, String, String), String>,
    branches: HashSet<(String, String)>,
    latest: HashMap<String, ReleaseRecord>,
    releases: HashMap<String, Vec<ReleaseRecord>>,
    failing_branches: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a repository reachable by name and listed in the organization.
    pub fn with_repository(mut self, name: &str) -> Self {
        let record = repository(name);
        self.org_repositories.push(record.clone());
        self.repositories.insert(name.to_string(), record);
        self
    }

    /// Registers the workflow templates directory listing.
    pub fn with_templates(mut self, names: &[&str]) -> Self {
        let entries = names
            .iter()
            .map(|name| DirectoryEntry {
                name: name.to_string(),
                path: format!("workflow-templates/{name}"),
                kind: "file".to_string(),
            })
            .collect();
        self.directories.insert(
            (
                ".github".to_string(),
                "workflow-templates".to_string(),
                "master".to_string(),
            ),
            entries,
        );
        self
    }

    pub fn with_file(mut self, repo: &str, reference: &str, path: &str, content: &str) -> Self {
        self.files.insert(
            (repo.to_string(), reference.to_string(), path.to_string()),
            content.to_string(),
        );
        self
    }

    pub fn with_manifest(self, repo: &str, reference: &str, version: &str) -> Self {
        self.with_file(
            repo,
            reference,
            "appinfo/info.xml",
            &info_xml(version, "25", "28"),
        )
    }

    pub fn with_workflow(self, repo: &str, reference: &str, name: &str) -> Self {
        self.with_file(repo, reference, &format!(".github/workflows/{name}"), "on: push")
    }

    pub fn with_branch(mut self, repo: &str, branch: &str) -> Self {
        self.branches.insert((repo.to_string(), branch.to_string()));
        self
    }

    pub fn with_latest_release(mut self, repo: &str, release: ReleaseRecord) -> Self {
        self.latest.insert(repo.to_string(), release);
        self
    }

    /// Sets the releases list, newest first.
    pub fn with_releases(mut self, repo: &str, releases: Vec<ReleaseRecord>) -> Self {
        self.releases.insert(repo.to_string(), releases);
        self
    }

    /// Makes branch lookups in `repo` fail with a server error.
    pub fn with_failing_branches(mut self, repo: &str) -> Self {
        self.failing_branches.insert(repo.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn file(&self, repo: &str, reference: &str, path: &str) -> Option<&String> {
        self.files
            .get(&(repo.to_string(), reference.to_string(), path.to_string()))
    }
}

#[async_trait]
impl RepositoryHost for FakeHost {
    async fn list_directory(
        &self,
        _owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<Vec<DirectoryEntry>, HostError> {
        self.record(format!("list_directory:{repo}:{path}@{reference}"));
        self.directories
            .get(&(repo.to_string(), path.to_string(), reference.to_string()))
            .cloned()
            .ok_or_else(not_found)
    }

    async fn get_repository(
        &self,
        _owner: &str,
        name: &str,
    ) -> Result<RepositoryRecord, HostError> {
        self.record(format!("get_repository:{name}"));
        self.repositories.get(name).cloned().ok_or_else(not_found)
    }

    async fn list_org_repositories(&self, org: &str) -> Result<Vec<RepositoryRecord>, HostError> {
        self.record(format!("list_org_repositories:{org}"));
        Ok(self.org_repositories.clone())
    }

    async fn file_exists(
        &self,
        _owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<bool, HostError> {
        self.record(format!("file_exists:{repo}:{path}@{reference}"));
        Ok(self.file(repo, reference, path).is_some())
    }

    async fn download_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<String, HostError> {
        self.record(format!("download_file:{repo}:{path}@{reference}"));
        self.file(repo, reference, path)
            .cloned()
            .ok_or_else(|| HostError::FileNotFound {
                repository: format!("{owner}/{repo}"),
                path: path.to_string(),
                reference: reference.to_string(),
            })
    }

    async fn get_branch(
        &self,
        _owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Option<BranchRecord>, HostError> {
        self.record(format!("get_branch:{repo}:{branch}"));
        if self.failing_branches.contains(repo) {
            return Err(HostError::Api {
                status: 500,
                message: "Server Error".to_string(),
            });
        }
        Ok(self
            .branches
            .contains(&(repo.to_string(), branch.to_string()))
            .then(|| BranchRecord {
                name: branch.to_string(),
            }))
    }

    async fn latest_release(
        &self,
        _owner: &str,
        repo: &str,
    ) -> Result<Option<ReleaseRecord>, HostError> {
        self.record(format!("latest_release:{repo}"));
        Ok(self.latest.get(repo).cloned())
    }

    async fn list_releases(
        &self,
        _owner: &str,
        repo: &str,
    ) -> Result<Vec<ReleaseRecord>, HostError> {
        self.record(format!("list_releases:{repo}"));
        Ok(self.releases.get(repo).cloned().unwrap_or_default())
    }
}
