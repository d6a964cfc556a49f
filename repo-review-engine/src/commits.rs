//! Grouping of commit history by the issue each message references.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::git_providers::types::Commit;

/// Scope of commits that reference no issue.
pub const DEFAULT_SCOPE: &str = "General Improvements";

/// Commits sharing one scope, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitGroup {
    pub scope: String,
    pub commits: Vec<Commit>,
}

/// First issue reference: `fixes|closes|resolves #N`, else any bare `#N`.
static ISSUE_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:fixes|closes|resolves)\s+#(\d+)|#(\d+)").expect("valid issue regex")
});

/// Scope for one commit message; only the first issue reference counts.
pub fn scope_of(message: &str) -> String {
    ISSUE_REF
        .captures(message)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|n| format!("Issue #{}", n.as_str()))
        .unwrap_or_else(|| DEFAULT_SCOPE.to_string())
}

/// Buckets commits by scope.
///
/// Within a group commits are ordered by author date, newest first, keeping
/// input order on ties. Groups are ordered by label (so `Issue #10` comes
/// before `Issue #2`), with the default scope always last.
pub fn group_commits(commits: Vec<Commit>) -> Vec<CommitGroup> {
    let total = commits.len();
    let mut buckets: HashMap<String, Vec<Commit>> = HashMap::new();
    for commit in commits {
        buckets.entry(scope_of(&commit.message)).or_default().push(commit);
    }

    let mut groups: Vec<CommitGroup> = buckets
        .into_iter()
        .map(|(scope, mut commits)| {
            commits.sort_by(|a, b| b.author_date.cmp(&a.author_date));
            CommitGroup { scope, commits }
        })
        .collect();

    groups.sort_by(|a, b| {
        let a_default = a.scope == DEFAULT_SCOPE;
        let b_default = b.scope == DEFAULT_SCOPE;
        a_default.cmp(&b_default).then_with(|| a.scope.cmp(&b.scope))
    });

    debug!(commits = total, groups = groups.len(), "commits grouped");
    groups
}
