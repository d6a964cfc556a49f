use repo_review_engine::SubmissionReport;
use serde::Serialize;

/// Report of one submission plus its standing against newer ones.
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    /// Generation number of this submission.
    pub generation: u64,
    /// `true` when a newer submission started before this one finished;
    /// the report was then not stored as the latest.
    pub superseded: bool,
    #[serde(flatten)]
    pub report: SubmissionReport,
}
