use repo_review_engine::{SubmissionContext, SubmissionTracker};

use crate::error_handler::{AppError, AppResult};

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// GitHub client, reviewer and limits used by every submission.
    pub engine: SubmissionContext,
    /// Latest report; older in-flight submissions cannot overwrite it.
    pub tracker: SubmissionTracker,
}

impl AppState {
    pub fn new(engine: SubmissionContext) -> Self {
        Self {
            engine,
            tracker: SubmissionTracker::new(),
        }
    }

    /// Load shared state from environment variables.
    ///
    /// A missing LLM key is not fatal here; it surfaces on each review.
    pub fn from_env() -> AppResult<Self> {
        let engine = SubmissionContext::from_env().map_err(AppError::Engine)?;
        Ok(Self::new(engine))
    }
}
