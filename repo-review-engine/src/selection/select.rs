//! Extension / directory filtering and two-tier ranking of tree entries.

use serde::Serialize;
use tracing::debug;

use crate::git_providers::types::FileEntry;
use crate::selection::languages;

/// Top-level directories whose files are preferred for review.
pub const SOURCE_DIRS: &[&str] = &["src", "app", "lib", "source", "sources", "main"];

/// Top-level directories that are never reviewed.
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "target",
    "vendor",
    "test",
    "tests",
    "docs",
    "examples",
    ".git",
    ".github",
    "assets",
    "static",
];

/// Upper bounds applied to a single review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionLimits {
    pub max_files: usize,
    /// Character budget of the assembled review input.
    pub max_chars: usize,
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            max_files: 5,
            max_chars: 70_000,
        }
    }
}

/// Priority tier; `Source` sorts before `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceRank {
    Source,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub entry: FileEntry,
    pub rank: SourceRank,
}

impl SelectedFile {
    pub fn path(&self) -> &str {
        &self.entry.path
    }
}

fn under_any(path: &str, dirs: &[&str]) -> bool {
    dirs.iter().any(|d| {
        path.strip_prefix(d)
            .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Picks at most `max_files` reviewable files for `language`.
///
/// Unknown languages and trees without a match both yield an empty list.
pub fn select_files(entries: &[FileEntry], language: &str, max_files: usize) -> Vec<SelectedFile> {
    let Some(spec) = languages::lookup(language) else {
        return Vec::new();
    };

    let mut selected: Vec<SelectedFile> = entries
        .iter()
        .filter(|e| e.is_file())
        .filter_map(|e| {
            let lower = e.path.to_lowercase();
            if !spec.extensions.iter().any(|ext| lower.ends_with(ext)) {
                return None;
            }
            if under_any(&lower, IGNORED_DIRS) {
                return None;
            }
            let rank = if under_any(&lower, SOURCE_DIRS) {
                SourceRank::Source
            } else {
                SourceRank::Other
            };
            Some(SelectedFile {
                entry: e.clone(),
                rank,
            })
        })
        .collect();

    let matched = selected.len();
    selected.sort_by(|a, b| (a.rank, &a.entry.path).cmp(&(b.rank, &b.entry.path)));
    selected.truncate(max_files);

    debug!(
        language = spec.id,
        candidates = entries.len(),
        matched,
        selected = selected.len(),
        "files selected"
    );

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(selected: &[SelectedFile]) -> Vec<&str> {
        selected.iter().map(|s| s.path()).collect()
    }

    #[test]
    fn ignored_directories_and_foreign_extensions_are_skipped() {
        let entries = vec![
            FileEntry::file("src/main.py"),
            FileEntry::file("tests/test_main.py"),
            FileEntry::file("node_modules/x/index.py"),
            FileEntry::file("README.md"),
            FileEntry::directory("src"),
        ];
        let s = select_files(&entries, "python", 5);
        assert_eq!(paths(&s), vec!["src/main.py"]);
        assert_eq!(s[0].rank, SourceRank::Source);
    }

    #[test]
    fn source_directories_rank_first_then_alphabetical() {
        let entries = vec![
            FileEntry::file("z.py"),
            FileEntry::file("lib/b.py"),
            FileEntry::file("a.py"),
            FileEntry::file("app/a.py"),
            FileEntry::file("tools/c.py"),
        ];
        let s = select_files(&entries, "python", 5);
        assert_eq!(
            paths(&s),
            vec!["app/a.py", "lib/b.py", "a.py", "tools/c.py", "z.py"]
        );
    }

    #[test]
    fn never_more_than_max_files() {
        let entries: Vec<_> = (0..20).map(|i| FileEntry::file(format!("src/f{i:02}.rs"))).collect();
        let s = select_files(&entries, "rust", 5);
        assert_eq!(s.len(), 5);
        assert_eq!(s[0].path(), "src/f00.rs");
    }

    #[test]
    fn matching_is_case_insensitive_but_prefix_exact() {
        let entries = vec![
            FileEntry::file("SRC/Main.PY"),
            FileEntry::file("testing/x.py"),
            FileEntry::file("Docs/y.py"),
        ];
        let s = select_files(&entries, "python", 5);
        assert_eq!(paths(&s), vec!["SRC/Main.PY", "testing/x.py"]);
        assert_eq!(s[0].rank, SourceRank::Source);
        assert_eq!(s[1].rank, SourceRank::Other);
    }

    #[test]
    fn every_selected_file_is_eligible() {
        let entries = vec![
            FileEntry::file("src/a.ts"),
            FileEntry::file("src/a.tsx"),
            FileEntry::file("dist/a.ts"),
            FileEntry::file("a.js"),
        ];
        for s in select_files(&entries, "typescript", 5) {
            let p = s.path().to_lowercase();
            assert!(p.ends_with(".ts") || p.ends_with(".tsx"));
            assert!(!IGNORED_DIRS.iter().any(|d| p.starts_with(&format!("{d}/"))));
        }
    }

    #[test]
    fn unknown_language_selects_nothing() {
        let entries = vec![FileEntry::file("src/main.py")];
        assert!(select_files(&entries, "cobol", 5).is_empty());
    }
}
