//! Provider-agnostic data model for repositories, file trees and commits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Branch assumed when the URL does not name one.
pub const DEFAULT_BRANCH: &str = "main";

/// Branch tried once when [`DEFAULT_BRANCH`] does not exist.
pub const FALLBACK_BRANCH: &str = "master";

/// A repository at a specific branch.
///
/// Derived once from the submitted URL. After a `main → master` fallback the
/// effective branch travels in a new value built by [`with_branch`].
///
/// [`with_branch`]: RepositoryReference::with_branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryReference {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl RepositoryReference {
    /// Same repository, different branch.
    pub fn with_branch(&self, branch: &str) -> Self {
        Self {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            branch: branch.to_string(),
        }
    }

    /// `true` when the branch is `main`, implicit or written out in the URL.
    pub fn uses_default_branch(&self) -> bool {
        self.branch == DEFAULT_BRANCH
    }

    /// `owner/repo` slug, handy for logs.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Kind of a node in a recursive tree listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Directory,
}

/// One node of a recursive tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub kind: FileKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl FileEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: FileKind::File,
            size: None,
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: FileKind::Directory,
            size: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }
}

/// A single commit of the branch history, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    pub author_name: String,
    pub author_email: String,
    pub author_date: DateTime<Utc>,
    pub html_url: String,
}

impl Commit {
    /// First line of the message.
    pub fn title(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}
