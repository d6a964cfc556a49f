//! Review pipeline for public GitHub repositories.
//!
//! One submission runs two independent branches:
//!   * review: tree listing → file selection → budgeted assembly → LLM review
//!   * commits: commit log → grouping by referenced issue
//!
//! [`run_submission`] drives both; [`SubmissionTracker`] keeps only the
//! newest result.

pub mod commits;
pub mod errors;
pub mod git_providers;
pub mod repo_url;
pub mod review;
pub mod selection;
pub mod submission;

pub use commits::{CommitGroup, DEFAULT_SCOPE, group_commits};
pub use errors::{
    EngineError, EngineResult, ProviderError, ProviderResult, SelectionError, ValidationError,
};
pub use git_providers::{GitHubClient, ProviderConfig, RepositoryReference};
pub use repo_url::parse_repository_url;
pub use selection::{LanguageSpec, SelectionLimits};
pub use submission::{
    BranchFailure, BranchOutcome, CommitOutcome, ReviewOutcome, SubmissionContext,
    SubmissionReport, SubmissionTicket, SubmissionTracker, run_submission,
};
