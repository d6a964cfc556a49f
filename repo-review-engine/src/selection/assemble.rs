//! Budgeted, marker-delimited concatenation of selected file contents.

use std::fmt::Display;
use std::future::Future;

use tracing::{debug, warn};

use crate::errors::SelectionError;
use crate::selection::select::SelectedFile;

/// Review input built from the selected files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledCode {
    pub text: String,
    pub files_included: Vec<String>,
}

fn append_file(out: &mut String, path: &str, content: &str) {
    out.push_str("File: ");
    out.push_str(path);
    out.push_str("\n\n");
    out.push_str(content);
    out.push_str("\n\nEnd of File: ");
    out.push_str(path);
    out.push_str("\n\n");
}

/// Fetches `files` in order and concatenates them until `budget` characters
/// of content have been collected.
///
/// Only content counts toward the budget. A file that would overflow it is
/// skipped and iteration stops, unless nothing has been included yet, in
/// which case it is taken whole. Failed fetches are logged and skipped.
pub async fn assemble_code<F, Fut, E>(
    files: &[SelectedFile],
    budget: usize,
    mut fetch: F,
) -> Result<AssembledCode, SelectionError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<String, E>>,
    E: Display,
{
    let mut text = String::new();
    let mut included: Vec<String> = Vec::new();
    let mut used = 0usize;

    for file in files {
        let path = file.path();
        let content = match fetch(path.to_string()).await {
            Ok(c) => c,
            Err(e) => {
                warn!(%path, error = %e, "skipping file, content fetch failed");
                continue;
            }
        };

        let chars = content.chars().count();
        if used + chars > budget && !included.is_empty() {
            debug!(%path, used, chars, budget, "budget reached, stopping before file");
            break;
        }

        append_file(&mut text, path, &content);
        used += chars;
        included.push(path.to_string());

        if used >= budget {
            debug!(used, budget, "budget exhausted");
            break;
        }
    }

    if included.is_empty() {
        return Err(SelectionError::AllFetchesFailed {
            paths: files.iter().map(|f| f.path().to_string()).collect(),
        });
    }

    debug!(files = included.len(), chars = used, "code assembled");

    Ok(AssembledCode {
        text,
        files_included: included,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::git_providers::types::FileEntry;
    use crate::selection::select::SourceRank;

    fn files(paths: &[&str]) -> Vec<SelectedFile> {
        paths
            .iter()
            .map(|p| SelectedFile {
                entry: FileEntry::file(*p),
                rank: SourceRank::Source,
            })
            .collect()
    }

    fn contents(pairs: &[(&str, String)]) -> HashMap<String, String> {
        pairs.iter().map(|(p, c)| (p.to_string(), c.clone())).collect()
    }

    async fn run(
        selected: &[SelectedFile],
        budget: usize,
        store: &HashMap<String, String>,
    ) -> Result<AssembledCode, SelectionError> {
        assemble_code(selected, budget, |path| {
            let found = store.get(&path).cloned();
            async move { found.ok_or_else(|| format!("404 for {path}")) }
        })
        .await
    }

    #[tokio::test]
    async fn markers_wrap_each_file() {
        let store = contents(&[("src/a.py", "print(1)".into())]);
        let out = run(&files(&["src/a.py"]), 100, &store).await.unwrap();
        assert_eq!(out.text, "File: src/a.py\n\nprint(1)\n\nEnd of File: src/a.py\n\n");
        assert_eq!(out.files_included, vec!["src/a.py"]);
    }

    #[tokio::test]
    async fn stops_before_a_file_that_would_overflow() {
        let store = contents(&[
            ("a", "x".repeat(6)),
            ("b", "y".repeat(6)),
            ("c", "z".repeat(2)),
        ]);
        let out = run(&files(&["a", "b", "c"]), 10, &store).await.unwrap();
        assert_eq!(out.files_included, vec!["a"]);
        assert!(!out.text.contains('y'));
        assert!(!out.text.contains('z'));
    }

    #[tokio::test]
    async fn exact_budget_stops_without_fetching_further() {
        let store = contents(&[("a", "x".repeat(10)), ("b", "y".into())]);
        let mut fetched: Vec<String> = Vec::new();

        let out = assemble_code(&files(&["a", "b"]), 10, |path| {
            fetched.push(path.clone());
            let found = store.get(&path).cloned();
            async move { found.ok_or_else(|| format!("404 for {path}")) }
        })
        .await
        .unwrap();

        assert_eq!(out.files_included, vec!["a"]);
        assert_eq!(fetched, vec!["a"]);
    }

    #[tokio::test]
    async fn oversized_first_file_is_included_alone() {
        let store = contents(&[("big", "x".repeat(50)), ("small", "y".into())]);
        let out = run(&files(&["big", "small"]), 10, &store).await.unwrap();
        assert_eq!(out.files_included, vec!["big"]);
    }

    #[tokio::test]
    async fn budget_counts_characters_not_bytes() {
        let store = contents(&[("a", "é".repeat(5)), ("b", "ü".repeat(5))]);
        let out = run(&files(&["a", "b"]), 10, &store).await.unwrap();
        assert_eq!(out.files_included, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn failed_fetches_are_skipped() {
        let store = contents(&[("b", "ok".into())]);
        let out = run(&files(&["a", "b"]), 100, &store).await.unwrap();
        assert_eq!(out.files_included, vec!["b"]);
    }

    #[tokio::test]
    async fn all_fetches_failing_lists_attempted_paths() {
        let store = HashMap::new();
        let err = run(&files(&["a", "b"]), 100, &store).await.unwrap_err();
        assert_eq!(
            err,
            SelectionError::AllFetchesFailed {
                paths: vec!["a".into(), "b".into()]
            }
        );
    }
}
