//! Outcome types of one submission, serialized as-is by the HTTP layer.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::commits::CommitGroup;
use crate::errors::{EngineError, EngineResult};
use crate::git_providers::types::RepositoryReference;

/// Stable code and user-facing message of a failed branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchFailure {
    pub code: String,
    pub message: String,
}

impl From<&EngineError> for BranchFailure {
    fn from(e: &EngineError) -> Self {
        Self {
            code: e.code().to_string(),
            message: e.user_message(),
        }
    }
}

/// Result of one branch of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum BranchOutcome<T> {
    Succeeded(T),
    Failed(BranchFailure),
}

impl<T> BranchOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, BranchOutcome::Succeeded(_))
    }

    pub fn succeeded(&self) -> Option<&T> {
        match self {
            BranchOutcome::Succeeded(v) => Some(v),
            BranchOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&BranchFailure> {
        match self {
            BranchOutcome::Succeeded(_) => None,
            BranchOutcome::Failed(f) => Some(f),
        }
    }
}

impl<T> From<EngineResult<T>> for BranchOutcome<T> {
    fn from(res: EngineResult<T>) -> Self {
        match res {
            Ok(v) => BranchOutcome::Succeeded(v),
            Err(e) => {
                warn!(code = e.code(), error = %e, "submission branch failed");
                BranchOutcome::Failed(BranchFailure::from(&e))
            }
        }
    }
}

/// Successful review branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewOutcome {
    /// Raw model answer (markdown).
    pub feedback: String,
    pub files_reviewed: Vec<String>,
    /// Branch the files were read from, after any fallback.
    pub branch: String,
}

/// Successful commit branch; `groups` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitOutcome {
    pub branch: String,
    pub groups: Vec<CommitGroup>,
}

/// Both branch outcomes of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReport {
    pub repository: RepositoryReference,
    pub language: String,
    pub submitted_at: DateTime<Utc>,
    pub review: BranchOutcome<ReviewOutcome>,
    pub commits: BranchOutcome<CommitOutcome>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::ProviderError;

    #[test]
    fn outcomes_serialize_with_status_tag() {
        let ok = BranchOutcome::from(EngineResult::Ok(CommitOutcome {
            branch: "main".into(),
            groups: vec![],
        }));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "status": "succeeded", "data": { "branch": "main", "groups": [] } })
        );

        let failed =
            BranchOutcome::<CommitOutcome>::from(Err(EngineError::from(ProviderError::Forbidden)));
        let v = serde_json::to_value(&failed).unwrap();
        assert_eq!(v["status"], "failed");
        assert_eq!(v["data"]["code"], "GITHUB_RATE_LIMITED");
    }
}
