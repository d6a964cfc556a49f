//! Fixed catalogue of reviewable languages.

use serde::Serialize;

/// One reviewable language: stable id, display label and file extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub extensions: &'static [&'static str],
}

const CATALOGUE: &[LanguageSpec] = &[
    LanguageSpec { id: "javascript", label: "JavaScript", extensions: &[".js", ".jsx"] },
    LanguageSpec { id: "python", label: "Python", extensions: &[".py"] },
    LanguageSpec { id: "typescript", label: "TypeScript", extensions: &[".ts", ".tsx"] },
    LanguageSpec { id: "java", label: "Java", extensions: &[".java"] },
    LanguageSpec { id: "csharp", label: "C#", extensions: &[".cs"] },
    LanguageSpec { id: "go", label: "Go", extensions: &[".go"] },
    LanguageSpec { id: "rust", label: "Rust", extensions: &[".rs"] },
    LanguageSpec { id: "html", label: "HTML", extensions: &[".html", ".htm"] },
    LanguageSpec { id: "css", label: "CSS", extensions: &[".css"] },
    LanguageSpec { id: "cpp", label: "C++", extensions: &[".cpp", ".cxx", ".h", ".hpp"] },
    LanguageSpec { id: "php", label: "PHP", extensions: &[".php"] },
    LanguageSpec { id: "ruby", label: "Ruby", extensions: &[".rb"] },
    LanguageSpec { id: "swift", label: "Swift", extensions: &[".swift"] },
    LanguageSpec { id: "kotlin", label: "Kotlin", extensions: &[".kt", ".kts"] },
    LanguageSpec { id: "sql", label: "SQL", extensions: &[".sql"] },
    LanguageSpec { id: "markdown", label: "Markdown", extensions: &[".md", ".markdown"] },
    LanguageSpec { id: "json", label: "JSON", extensions: &[".json"] },
    LanguageSpec { id: "shell", label: "Shell Script", extensions: &[".sh", ".bash"] },
];

/// Finds a language by id (case-insensitive).
pub fn lookup(id: &str) -> Option<&'static LanguageSpec> {
    let id = id.trim();
    CATALOGUE.iter().find(|l| l.id.eq_ignore_ascii_case(id))
}

/// Whole catalogue in display order.
pub fn all() -> &'static [LanguageSpec] {
    CATALOGUE
}

impl LanguageSpec {
    /// Extensions as owned strings, used in "no files found" messages.
    pub fn extension_list(&self) -> Vec<String> {
        self.extensions.iter().map(|e| e.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_eighteen_unique_ids() {
        let mut ids: Vec<_> = all().iter().map(|l| l.id).collect();
        assert_eq!(ids.len(), 18);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 18);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("Python").map(|l| l.extensions), Some(&[".py"][..]));
        assert_eq!(lookup("cpp").map(|l| l.label), Some("C++"));
        assert!(lookup("cobol").is_none());
    }
}
