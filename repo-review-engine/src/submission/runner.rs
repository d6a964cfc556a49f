//! Runs one submission: the review branch and the commit branch side by side.

use std::sync::Arc;

use ai_llm_service::{AiLlmError, LlmService, config_from_env};
use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::commits::group_commits;
use crate::errors::{EngineError, EngineResult, SelectionError, ValidationError};
use crate::git_providers::types::{FALLBACK_BRANCH, FileEntry, RepositoryReference};
use crate::git_providers::{GitHubClient, ProviderConfig};
use crate::repo_url::parse_repository_url;
use crate::review::build_review_prompt;
use crate::selection::languages::{self, LanguageSpec};
use crate::selection::{SelectionLimits, assemble_code, select_files};
use crate::submission::report::{CommitOutcome, ReviewOutcome, SubmissionReport};

/// Long-lived collaborators shared by all submissions.
///
/// A reviewer that failed to configure is kept as its user-facing message;
/// review branches then fail immediately while commit branches still run.
#[derive(Debug, Clone)]
pub struct SubmissionContext {
    github: GitHubClient,
    reviewer: Result<Arc<LlmService>, String>,
    limits: SelectionLimits,
}

impl SubmissionContext {
    pub fn new(
        github: GitHubClient,
        reviewer: Result<LlmService, AiLlmError>,
        limits: SelectionLimits,
    ) -> Self {
        let reviewer = match reviewer {
            Ok(svc) => {
                info!(provider = ?svc.provider(), "reviewer configured");
                Ok(Arc::new(svc))
            }
            Err(e) => {
                warn!(error = %e, "reviewer not configured, reviews will fail");
                Err(e.user_message())
            }
        };

        Self {
            github,
            reviewer,
            limits,
        }
    }

    /// GitHub bases from `GITHUB_*`, reviewer from `LLM_*`.
    ///
    /// Only a GitHub client that cannot be built is fatal.
    pub fn from_env() -> EngineResult<Self> {
        let github = GitHubClient::from_config(ProviderConfig::from_env())?;
        let reviewer = config_from_env().and_then(LlmService::from_config);
        Ok(Self::new(github, reviewer, SelectionLimits::default()))
    }

    pub fn reviewer_ready(&self) -> bool {
        self.reviewer.is_ok()
    }
}

/// Validates the input, then runs the review and commit branches concurrently.
///
/// Returns `Err` only for validation failures, which happen before any
/// network call. Branch failures are reported inside the report.
#[instrument(skip_all, fields(repo_url = %repo_url, language = %language))]
pub async fn run_submission(
    ctx: &SubmissionContext,
    repo_url: &str,
    language: &str,
) -> EngineResult<SubmissionReport> {
    let reference = parse_repository_url(repo_url)?;
    let spec = languages::lookup(language)
        .ok_or_else(|| ValidationError::UnsupportedLanguage(language.trim().to_string()))?;

    info!(
        repo = %reference.slug(),
        branch = %reference.branch,
        language = spec.id,
        "submission accepted"
    );

    let (review, commits) = tokio::join!(
        review_branch(ctx, &reference, spec),
        commit_branch(ctx, &reference)
    );

    let report = SubmissionReport {
        repository: reference,
        language: spec.id.to_string(),
        submitted_at: Utc::now(),
        review: review.into(),
        commits: commits.into(),
    };

    info!(
        review_ok = report.review.is_success(),
        commits_ok = report.commits.is_success(),
        "submission finished"
    );

    Ok(report)
}

/// Tree → select → fetch/assemble → prompt → model.
async fn review_branch(
    ctx: &SubmissionContext,
    reference: &RepositoryReference,
    spec: &LanguageSpec,
) -> EngineResult<ReviewOutcome> {
    let reviewer = ctx
        .reviewer
        .as_ref()
        .map_err(|msg| EngineError::ReviewerUnavailable(msg.clone()))?;

    let github = &ctx.github;
    let (effective, tree) = fetch_tree_with_fallback(github, reference).await?;

    let selected = select_files(&tree, spec.id, ctx.limits.max_files);
    if selected.is_empty() {
        return Err(SelectionError::NoMatchingFiles {
            language: spec.label.to_string(),
            extensions: spec.extension_list(),
        }
        .into());
    }

    let branch_ref = &effective;
    let assembled = assemble_code(&selected, ctx.limits.max_chars, |path| async move {
        github.fetch_file_raw(branch_ref, &path).await
    })
    .await?;

    let prompt = build_review_prompt(&assembled.text, spec.id, &assembled.files_included);
    debug!(prompt_len = prompt.len(), "requesting review");

    let feedback = reviewer.generate(&prompt, None).await?;

    info!(
        files = assembled.files_included.len(),
        branch = %effective.branch,
        feedback_len = feedback.len(),
        "review completed"
    );

    Ok(ReviewOutcome {
        feedback,
        files_reviewed: assembled.files_included,
        branch: effective.branch,
    })
}

/// Commit log of the branch named by the URL → groups. Never retried.
async fn commit_branch(
    ctx: &SubmissionContext,
    reference: &RepositoryReference,
) -> EngineResult<CommitOutcome> {
    let commits = ctx.github.fetch_commits(reference).await?;

    Ok(CommitOutcome {
        branch: reference.branch.clone(),
        groups: group_commits(commits),
    })
}

/// Fetches the tree of `reference`; on 404 for the default `main` branch,
/// fetches `master` once instead.
///
/// Returns the reference that actually answered alongside the listing.
async fn fetch_tree_with_fallback(
    github: &GitHubClient,
    reference: &RepositoryReference,
) -> EngineResult<(RepositoryReference, Vec<FileEntry>)> {
    match github.fetch_tree(reference).await {
        Ok(tree) => Ok((reference.clone(), tree)),
        Err(e) if e.is_not_found() && reference.uses_default_branch() => {
            let fallback = reference.with_branch(FALLBACK_BRANCH);
            warn!(
                repo = %reference.slug(),
                from = %reference.branch,
                to = %fallback.branch,
                "branch not found, retrying tree with fallback"
            );
            match github.fetch_tree(&fallback).await {
                Ok(tree) => Ok((fallback, tree)),
                Err(source) => Err(EngineError::BranchNotFound {
                    owner: reference.owner.clone(),
                    repo: reference.repo.clone(),
                    source,
                }),
            }
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use ai_llm_service::{ConfigError, LlmModelConfig, LlmProvider};
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::submission::report::BranchOutcome;

    const REPO: &str = "https://github.com/octocat/hello-world";

    fn gemini(server: &MockServer) -> Result<LlmService, AiLlmError> {
        LlmService::from_config(LlmModelConfig {
            provider: LlmProvider::Gemini,
            model: "gemini-test".into(),
            endpoint: server.uri(),
            api_key: Some("AIza-test".into()),
            max_tokens: None,
            temperature: Some(0.2),
            top_p: None,
            timeout_secs: Some(5),
        })
    }

    fn ctx(server: &MockServer, reviewer: Result<LlmService, AiLlmError>) -> SubmissionContext {
        let github = GitHubClient::from_config(ProviderConfig {
            base_api: server.uri(),
            raw_base: format!("{}/raw", server.uri()),
            timeout_secs: 5,
        })
        .unwrap();
        SubmissionContext::new(github, reviewer, SelectionLimits::default())
    }

    fn tree(paths: &[&str]) -> Value {
        let items: Vec<Value> = paths
            .iter()
            .map(|p| json!({ "path": p, "type": "blob", "sha": "s", "url": "u" }))
            .collect();
        json!({ "sha": "root", "tree": items, "truncated": false })
    }

    fn commit_json(sha: &str, message: &str, date: &str) -> Value {
        json!({
            "sha": sha,
            "html_url": format!("https://github.com/octocat/hello-world/commit/{sha}"),
            "commit": {
                "message": message,
                "author": { "name": "Mona", "email": "mona@example.com", "date": date }
            }
        })
    }

    async fn mount_gemini_ok(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-test:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "Looks fine." }] } }]
            })))
            .mount(server)
            .await;
    }

    async fn requests_to(server: &MockServer, fragment: &str) -> Vec<wiremock::Request> {
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path().contains(fragment))
            .collect()
    }

    #[tokio::test]
    async fn reviews_only_source_files_and_groups_commits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/git/trees/main"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(tree(&["src/main.py", "tests/test_main.py"])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/raw/octocat/hello-world/main/src/main.py"))
            .respond_with(ResponseTemplate::new(200).set_body_string("print(1)"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .and(query_param("sha", "main"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                commit_json("a", "fix: resolve login bug, closes #42", "2024-05-02T00:00:00Z"),
                commit_json("b", "chore: update deps", "2024-05-01T00:00:00Z"),
            ])))
            .mount(&server)
            .await;
        mount_gemini_ok(&server).await;

        let c = ctx(&server, gemini(&server));
        let report = run_submission(&c, REPO, "python").await.unwrap();

        let review = report.review.succeeded().unwrap();
        assert_eq!(review.files_reviewed, vec!["src/main.py"]);
        assert_eq!(review.feedback, "Looks fine.");
        assert_eq!(review.branch, "main");

        let sent = requests_to(&server, "generateContent").await;
        assert_eq!(sent.len(), 1);
        let body = String::from_utf8_lossy(&sent[0].body).to_string();
        assert!(body.contains("File: src/main.py"));
        assert!(body.contains("print(1)"));
        assert!(!body.contains("test_main"));

        let commits = report.commits.succeeded().unwrap();
        let scopes: Vec<_> = commits.groups.iter().map(|g| g.scope.as_str()).collect();
        assert_eq!(scopes, vec!["Issue #42", "General Improvements"]);
    }

    #[tokio::test]
    async fn missing_main_falls_back_to_master() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/git/trees/main"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/git/trees/master"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tree(&["app.py"])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/raw/octocat/hello-world/master/app.py"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x = 1"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .and(query_param("sha", "main"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .and(query_param("sha", "master"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        mount_gemini_ok(&server).await;

        let c = ctx(&server, gemini(&server));
        let report = run_submission(&c, REPO, "python").await.unwrap();

        let review = report.review.succeeded().unwrap();
        assert_eq!(review.branch, "master");
        assert_eq!(review.files_reviewed, vec!["app.py"]);
        assert_eq!(report.repository.branch, "main");

        // Only the tree fetch falls back; commits stay on the URL's branch.
        assert_eq!(
            report.commits.failure().unwrap().code,
            "REPOSITORY_NOT_FOUND"
        );
        let commit_shas: Vec<String> = requests_to(&server, "/commits")
            .await
            .iter()
            .filter_map(|r| {
                r.url
                    .query_pairs()
                    .find(|(k, _)| k == "sha")
                    .map(|(_, v)| v.into_owned())
            })
            .collect();
        assert_eq!(commit_shas, vec!["main"]);
    }

    #[tokio::test]
    async fn explicit_branch_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let c = ctx(&server, gemini(&server));
        let report = run_submission(&c, &format!("{REPO}/tree/dev"), "python")
            .await
            .unwrap();

        assert_eq!(report.review.failure().unwrap().code, "REPOSITORY_NOT_FOUND");
        assert!(requests_to(&server, "/master").await.is_empty());
    }

    #[tokio::test]
    async fn neither_branch_found_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let c = ctx(&server, gemini(&server));
        let report = run_submission(&c, REPO, "python").await.unwrap();

        let review = report.review.failure().unwrap();
        assert_eq!(review.code, "BRANCH_NOT_FOUND");
        assert!(review.message.contains("Neither 'main' nor 'master'"));

        assert_eq!(
            report.commits.failure().unwrap().code,
            "REPOSITORY_NOT_FOUND"
        );
        assert_eq!(requests_to(&server, "/commits").await.len(), 1);
    }

    #[tokio::test]
    async fn zero_commits_is_a_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/git/trees/main"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tree(&[])))
            .mount(&server)
            .await;

        let c = ctx(&server, gemini(&server));
        let report = run_submission(&c, REPO, "python").await.unwrap();

        assert_eq!(
            report.commits,
            BranchOutcome::Succeeded(CommitOutcome {
                branch: "main".into(),
                groups: vec![],
            })
        );
        assert_eq!(report.review.failure().unwrap().code, "NO_MATCHING_FILES");
        assert!(
            report
                .review
                .failure()
                .unwrap()
                .message
                .contains("Supported extensions: .py")
        );
    }

    #[tokio::test]
    async fn missing_reviewer_fails_only_the_review_branch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([commit_json(
                "a",
                "initial",
                "2024-05-01T00:00:00Z"
            )])))
            .mount(&server)
            .await;

        let c = ctx(
            &server,
            Err(AiLlmError::Config(ConfigError::MissingVar("LLM_API_KEY"))),
        );
        assert!(!c.reviewer_ready());

        let report = run_submission(&c, REPO, "python").await.unwrap();

        assert_eq!(report.review.failure().unwrap().code, "LLM_CONFIG_ERROR");
        assert_eq!(report.commits.succeeded().unwrap().groups.len(), 1);
        assert!(requests_to(&server, "/git/trees").await.is_empty());
    }

    #[tokio::test]
    async fn both_branch_failures_are_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let c = ctx(&server, gemini(&server));
        let report = run_submission(&c, REPO, "python").await.unwrap();

        let review = report.review.failure().unwrap();
        let commits = report.commits.failure().unwrap();
        assert_eq!(review.code, "GITHUB_RATE_LIMITED");
        assert_eq!(commits.code, "GITHUB_RATE_LIMITED");
        assert!(review.message.contains("try again later"));
    }

    #[tokio::test]
    async fn unreadable_files_fail_the_review_with_their_paths() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/git/trees/main"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tree(&["src/a.py"])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/commits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/raw/octocat/hello-world/main/src/a.py"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let c = ctx(&server, gemini(&server));
        let report = run_submission(&c, REPO, "python").await.unwrap();

        let failure = report.review.failure().unwrap();
        assert_eq!(failure.code, "FILE_FETCH_FAILED");
        assert!(failure.message.contains("src/a.py"));
        assert!(requests_to(&server, "generateContent").await.is_empty());
    }

    #[tokio::test]
    async fn validation_errors_stop_before_any_request() {
        let server = MockServer::start().await;
        let c = ctx(&server, gemini(&server));

        let err = run_submission(&c, "https://gitlab.com/a/b", "python")
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let err = run_submission(&c, REPO, "cobol").await.unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_LANGUAGE");

        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }
}
