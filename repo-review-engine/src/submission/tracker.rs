//! Latest-submission slot that ignores results of superseded runs.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::submission::report::SubmissionReport;

/// Generation number handed out by [`SubmissionTracker::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubmissionTicket(u64);

impl SubmissionTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Holds the report of the most recent submission.
///
/// Every submission takes a ticket first. Publishing with a ticket older than
/// the newest one is a no-op, so a slow earlier run can never replace the
/// result of a later one.
#[derive(Debug, Default)]
pub struct SubmissionTracker {
    generation: AtomicU64,
    latest: RwLock<Option<SubmissionReport>>,
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new submission, superseding all earlier tickets.
    pub fn begin(&self) -> SubmissionTicket {
        let ticket = SubmissionTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        debug!(generation = ticket.0, "submission started");
        ticket
    }

    pub fn is_current(&self, ticket: SubmissionTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Stores `report` if `ticket` is still the newest. Returns whether it was stored.
    pub async fn publish(&self, ticket: SubmissionTicket, report: SubmissionReport) -> bool {
        let mut slot = self.latest.write().await;
        if !self.is_current(ticket) {
            info!(
                generation = ticket.0,
                current = self.generation.load(Ordering::SeqCst),
                "discarding result of superseded submission"
            );
            return false;
        }
        *slot = Some(report);
        true
    }

    pub async fn latest(&self) -> Option<SubmissionReport> {
        self.latest.read().await.clone()
    }
}
