//! GitHub provider (REST v3 + raw host) for trees, file contents and commits.
//!
//! Endpoints used:
//!   * GET {api}/repos/{owner}/{repo}/git/trees/{branch}?recursive=1
//!   * GET {raw}/{owner}/{repo}/{branch}/{path}
//!   * GET {api}/repos/{owner}/{repo}/commits?sha={branch}

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, Response, header};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::{ProviderError, ProviderResult};
use crate::git_providers::ProviderConfig;
use crate::git_providers::types::*;

const USER_AGENT: &str = "repo-review-engine/0.1";

/// GitHub HTTP client wrapper.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_api: String,
    raw_base: String,
}

impl GitHubClient {
    /// Constructs a GitHub client with a shared HTTP instance.
    pub fn new(http: Client, cfg: ProviderConfig) -> Self {
        debug!(base_api = %cfg.base_api, raw_base = %cfg.raw_base, "creating GitHubClient");
        Self {
            http,
            base_api: cfg.base_api,
            raw_base: cfg.raw_base,
        }
    }

    /// Builds the underlying HTTP client with a stable user agent and the
    /// configured per-request timeout.
    pub fn from_config(cfg: ProviderConfig) -> ProviderResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self::new(http, cfg))
    }

    /// Fetches the full recursive listing of `reference.branch`.
    ///
    /// Returns files and directories; submodule entries are dropped.
    pub async fn fetch_tree(&self, reference: &RepositoryReference) -> ProviderResult<Vec<FileEntry>> {
        let url = format!(
            "{}/repos/{}/git/trees/{}",
            self.base_api,
            repo_path(reference),
            urlencoding::encode(&reference.branch)
        );
        debug!("GitHub fetch_tree: {}", url);

        let resp = self
            .http
            .get(url)
            .query(&[("recursive", "1")])
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let body: GitHubTree = check_status(resp)?.json().await?;

        if body.truncated {
            warn!(
                repo = %reference.slug(),
                branch = %reference.branch,
                entries = body.tree.len(),
                "GitHub truncated the recursive tree listing"
            );
        }

        let entries: Vec<FileEntry> = body
            .tree
            .into_iter()
            .filter_map(|item| {
                let kind = match item.kind.as_str() {
                    "blob" => FileKind::File,
                    "tree" => FileKind::Directory,
                    _ => return None,
                };
                Some(FileEntry {
                    path: item.path,
                    kind,
                    size: item.size,
                })
            })
            .collect();

        debug!(
            repo = %reference.slug(),
            branch = %reference.branch,
            entries = entries.len(),
            "tree fetched"
        );

        Ok(entries)
    }

    /// Fetches the raw text of one file at `reference.branch`.
    ///
    /// Any non-2xx answer is an error; there is no retry.
    pub async fn fetch_file_raw(
        &self,
        reference: &RepositoryReference,
        path: &str,
    ) -> ProviderResult<String> {
        let encoded_path = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let url = format!(
            "{}/{}/{}/{}",
            self.raw_base,
            repo_path(reference),
            urlencoding::encode(&reference.branch),
            encoded_path
        );
        debug!("GitHub fetch_file_raw: {}", url);

        let resp = self.http.get(url).send().await?;
        let text = check_status(resp)?.text().await?;
        Ok(text)
    }

    /// Fetches the commit log of `reference.branch` (first page only).
    ///
    /// An empty list is a valid answer.
    pub async fn fetch_commits(&self, reference: &RepositoryReference) -> ProviderResult<Vec<Commit>> {
        let url = format!("{}/repos/{}/commits", self.base_api, repo_path(reference));
        debug!("GitHub fetch_commits: {} (sha={})", url, reference.branch);

        let resp = self
            .http
            .get(url)
            .query(&[("sha", reference.branch.as_str())])
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let raw: Vec<GitHubCommit> = check_status(resp)?.json().await?;

        let commits: Vec<Commit> = raw
            .into_iter()
            .map(|c| {
                let GitHubCommit {
                    sha,
                    html_url,
                    commit,
                } = c;
                let GitHubCommitInner { message, author } = commit;
                let author = author.unwrap_or_default();

                Commit {
                    sha,
                    message,
                    author_name: author.name.unwrap_or_default(),
                    author_email: author.email.unwrap_or_default(),
                    author_date: author.date.unwrap_or_default(),
                    html_url,
                }
            })
            .collect();

        debug!(
            repo = %reference.slug(),
            branch = %reference.branch,
            commits = commits.len(),
            "commits fetched"
        );

        Ok(commits)
    }
}

/// `owner/repo` with each component percent-encoded. The branch is encoded
/// by the caller: as a path segment or, for commits, by `.query()`.
fn repo_path(reference: &RepositoryReference) -> String {
    format!(
        "{}/{}",
        urlencoding::encode(&reference.owner),
        urlencoding::encode(&reference.repo)
    )
}

/// Passes 2xx responses through and maps everything else to [`ProviderError`],
/// keeping the `Retry-After` hint for 429.
fn check_status(resp: Response) -> ProviderResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let retry_after_secs = resp
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());

    warn!(status = status.as_u16(), url = %resp.url(), "GitHub returned non-success status");
    Err(ProviderError::from_status(status.as_u16(), retry_after_secs))
}

/// Git trees response (subset).
#[derive(Debug, Deserialize)]
struct GitHubTree {
    #[serde(default)]
    tree: Vec<GitHubTreeItem>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct GitHubTreeItem {
    path: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    size: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct GitHubCommit {
    sha: String,
    html_url: String,
    commit: GitHubCommitInner,
}

#[derive(Debug, Deserialize)]
struct GitHubCommitInner {
    message: String,
    #[serde(default)]
    author: Option<GitHubCommitAuthor>,
}

#[derive(Debug, Default, Deserialize)]
struct GitHubCommitAuthor {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}
