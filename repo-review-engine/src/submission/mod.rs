pub mod report;
pub mod runner;
pub mod tracker;

pub use report::{BranchFailure, BranchOutcome, CommitOutcome, ReviewOutcome, SubmissionReport};
pub use runner::{SubmissionContext, run_submission};
pub use tracker::{SubmissionTicket, SubmissionTracker};
