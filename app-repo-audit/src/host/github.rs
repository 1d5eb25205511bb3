//! [`RepositoryHost`] backed by the GitHub REST API through octocrab.

use super::{
    BranchRecord, DirectoryEntry, HostError, ReleaseRecord, RepositoryHost, RepositoryRecord,
};
use async_trait::async_trait;
use octocrab::params::repos::Type;
use octocrab::Octocrab;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Deserialize;
use tracing::debug;

/// Results per page for list endpoints.
const RESULTS_PER_PAGE: u8 = 100;

/// Characters escaped in a single path segment or query value.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Authenticated GitHub client.
#[derive(Clone)]
pub struct GitHubHost {
    octocrab: Octocrab,
}

/// Subset of the branch endpoint response the auditor needs.
#[derive(Debug, Deserialize)]
struct BranchResponse {
    name: String,
}

impl GitHubHost {
    /// Builds a client authenticated with a personal access token.
    ///
    /// `api_url` points the client at a GitHub Enterprise instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built or the URL is not a valid URI.
    pub fn new(token: &str, api_url: Option<&str>) -> Result<Self, octocrab::Error> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(api_url) = api_url {
            builder = builder.base_uri(api_url)?;
        }
        Ok(Self {
            octocrab: builder.build()?,
        })
    }
}

/// Converts an octocrab repository into a record.
fn to_record(repo: octocrab::models::Repository) -> Result<RepositoryRecord, HostError> {
    let owner = repo
        .owner
        .map(|owner| owner.login)
        .ok_or_else(|| HostError::MissingOwner {
            repository: repo.name.clone(),
        })?;

    Ok(RepositoryRecord {
        owner,
        name: repo.name,
        created_at: repo.created_at,
        pushed_at: repo.pushed_at,
    })
}

fn to_release(release: octocrab::models::repos::Release) -> ReleaseRecord {
    ReleaseRecord {
        tag_name: release.tag_name,
        name: release.name,
        prerelease: release.prerelease,
    }
}

/// Maps a 404 answer to `None` and every other error to a [`HostError`].
fn found<T>(result: Result<T, octocrab::Error>) -> Result<Option<T>, HostError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            let error = HostError::from(e);
            if error.is_not_found() {
                Ok(None)
            } else {
                Err(error)
            }
        }
    }
}

/// Interprets the status of a HEAD request for a file.
///
/// Success means the content exists; an absent answer (see
/// [`HostError::is_absent`]) means it does not; anything else is an error.
fn head_status(status: u16, reason: Option<&str>) -> Result<bool, HostError> {
    if (200..300).contains(&status) {
        return Ok(true);
    }

    let error = HostError::Api {
        status,
        message: reason.unwrap_or("Unexpected status").to_string(),
    };
    if error.is_absent() {
        Ok(false)
    } else {
        Err(error)
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// Percent-encodes each segment of a slash separated path.
fn encode_path(path: &str) -> String {
    path.split('/').map(encode).collect::<Vec<_>>().join("/")
}

fn contents_route(owner: &str, repo: &str, path: &str, reference: &str) -> String {
    format!(
        "/repos/{}/{}/contents/{}?ref={}",
        encode(owner),
        encode(repo),
        encode_path(path),
        encode(reference)
    )
}

fn branch_route(owner: &str, repo: &str, branch: &str) -> String {
    format!(
        "/repos/{}/{}/branches/{}",
        encode(owner),
        encode(repo),
        encode(branch)
    )
}

#[async_trait]
impl RepositoryHost for GitHubHost {
    async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<Vec<DirectoryEntry>, HostError> {
        debug!(owner, repo, path, reference, "Listing directory");

        // The contents endpoint returns the whole directory in one response.
        let mut contents = self
            .octocrab
            .repos(owner, repo)
            .get_content()
            .path(path)
            .r#ref(reference)
            .send()
            .await?;

        Ok(contents
            .take_items()
            .into_iter()
            .map(|item| DirectoryEntry {
                name: item.name,
                path: item.path,
                kind: item.r#type,
            })
            .collect())
    }

    async fn get_repository(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<RepositoryRecord, HostError> {
        debug!(owner, name, "Fetching repository");
        let repo = self.octocrab.repos(owner, name).get().await?;
        to_record(repo)
    }

    async fn list_org_repositories(&self, org: &str) -> Result<Vec<RepositoryRecord>, HostError> {
        debug!(org, "Listing public organization repositories");

        let first_page = self
            .octocrab
            .orgs(org)
            .list_repos()
            .repo_type(Type::Public)
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await?;

        let repositories = self.octocrab.all_pages(first_page).await?;
        debug!(org, count = repositories.len(), "Fetched all pages");

        repositories.into_iter().map(to_record).collect()
    }

    async fn file_exists(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<bool, HostError> {
        // HEAD keeps the file body off the wire.
        let builder = http::Request::builder()
            .method(http::Method::HEAD)
            .uri(contents_route(owner, repo, path, reference));
        let request = self.octocrab.build_request(builder, None::<&()>)?;
        let response = self.octocrab.execute(request).await?;

        let status = response.status();
        let exists = head_status(status.as_u16(), status.canonical_reason())?;
        debug!(owner, repo, path, reference, exists, "Checked file");
        Ok(exists)
    }

    async fn download_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<String, HostError> {
        debug!(owner, repo, path, reference, "Downloading file");

        let result = self
            .octocrab
            .repos(owner, repo)
            .get_content()
            .path(path)
            .r#ref(reference)
            .send()
            .await;

        let Some(mut contents) = found(result)? else {
            return Err(HostError::FileNotFound {
                repository: format!("{owner}/{repo}"),
                path: path.to_string(),
                reference: reference.to_string(),
            });
        };

        contents
            .take_items()
            .into_iter()
            .next()
            .and_then(|item| item.decoded_content())
            .ok_or_else(|| HostError::UndecodableContent {
                repository: format!("{owner}/{repo}"),
                path: path.to_string(),
                reference: reference.to_string(),
            })
    }

    async fn get_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Option<BranchRecord>, HostError> {
        let result = self
            .octocrab
            .get::<BranchResponse, _, ()>(branch_route(owner, repo, branch), None::<&()>)
            .await;

        Ok(found(result)?.map(|branch| BranchRecord { name: branch.name }))
    }

    async fn latest_release(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<ReleaseRecord>, HostError> {
        let result = self.octocrab.repos(owner, repo).releases().get_latest().await;
        Ok(found(result)?.map(to_release))
    }

    async fn list_releases(&self, owner: &str, repo: &str) -> Result<Vec<ReleaseRecord>, HostError> {
        // Only the newest entries matter, so the first page is enough.
        let page = self
            .octocrab
            .repos(owner, repo)
            .releases()
            .list()
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await?;

        Ok(page.items.into_iter().map(to_release).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_status_maps_absence_to_false() {
        assert!(head_status(200, Some("OK")).unwrap());
        assert!(!head_status(404, Some("Not Found")).unwrap());
        assert!(!head_status(409, Some("Conflict")).unwrap());
    }

    #[test]
    fn head_status_keeps_other_failures() {
        let err = head_status(403, Some("Forbidden")).unwrap_err();
        assert!(matches!(err, HostError::Api { status: 403, .. }));
        assert!(matches!(
            head_status(502, None),
            Err(HostError::Api { status: 502, .. })
        ));
    }

    #[test]
    fn contents_route_encodes_segments_and_reference() {
        assert_eq!(
            contents_route("nextcloud", "text", ".github/workflows/lint.yml", "master"),
            "/repos/nextcloud/text/contents/.github/workflows/lint.yml?ref=master"
        );
        assert_eq!(
            contents_route("nextcloud", "text", "appinfo/info.xml", "release/1.0#rc"),
            "/repos/nextcloud/text/contents/appinfo/info.xml?ref=release%2F1.0%23rc"
        );
    }

    #[test]
    fn branch_route_encodes_branch_name() {
        assert_eq!(
            branch_route("nextcloud", "text", "stable24"),
            "/repos/nextcloud/text/branches/stable24"
        );
        assert_eq!(
            branch_route("nextcloud", "text", "feature/lts#2"),
            "/repos/nextcloud/text/branches/feature%2Flts%232"
        );
    }
}
