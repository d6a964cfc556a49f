//! Review prompt template.

/// Builds the reviewer instruction for `code` written in `language`.
///
/// `files` names the concatenated files; when empty only the language is
/// mentioned.
pub fn build_review_prompt(code: &str, language: &str, files: &[String]) -> String {
    let context = if files.is_empty() {
        format!("The code provided below is from a {language} context.")
    } else {
        format!(
            "The code provided below is a concatenation of the following file(s) from a {language} repository: {}. Please consider this context in your review.",
            files.join(", ")
        )
    };

    format!(
        r#"Act as an expert AI code reviewer. Your task is to analyze the provided code snippet(s) and offer a detailed, constructive review.
{context}

Please structure your feedback clearly. You can use markdown for formatting, like headings, bold text, bullet points, and code blocks. Address each of the following sections relevant to the provided code:

**1. Overview & General Impression:**
   - A brief summary of the code's purpose (if discernible) and your overall assessment.

**2. Potential Bugs & Logical Errors:**
   - Identify any bugs, logical flaws, or unhandled edge cases. Provide specific examples from the code.

**3. Code Quality & Readability:**
   - Comment on code clarity, organization, naming conventions, and comments.
   - Suggest improvements for maintainability and readability.

**4. Adherence to Best Practices & Conventions ({language}-specific):**
   - Evaluate if the code follows common best practices, idiomatic patterns, and style guides for {language}.

**5. Performance Considerations (if applicable):**
   - Point out any potential performance bottlenecks and suggest optimizations if evident.

**6. Security Vulnerabilities (if applicable):**
   - Highlight any security concerns (e.g., input validation, data exposure, common vulnerabilities for {language}).

**7. Suggestions for Improvement & Refactoring:**
   - Provide concrete, actionable suggestions for making the code better, more robust, or more efficient. Use code examples for suggestions where helpful.

**8. Positive Aspects (Optional but encouraged):**
   - Mention any parts of the code that are well-written, demonstrate good practices, or solve problems effectively.

Please be thorough, constructive, and provide actionable advice. If the code is too short or lacks context for a full review, state that and provide feedback on what is available.

Code to review:
```{language}
{code}
```
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_files_and_fences_code() {
        let p = build_review_prompt("print(1)", "python", &["src/main.py".into()]);
        assert!(p.contains("following file(s) from a python repository: src/main.py."));
        assert!(p.contains("```python\nprint(1)\n```"));
        assert!(p.contains("**8. Positive Aspects"));
        assert!(p.contains("(python-specific)"));
    }

    #[test]
    fn without_files_only_the_language_is_mentioned() {
        let p = build_review_prompt("x", "go", &[]);
        assert!(p.contains("The code provided below is from a go context."));
        assert!(!p.contains("concatenation"));
    }
}
