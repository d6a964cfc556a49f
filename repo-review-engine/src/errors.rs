//! Crate-wide error hierarchy for repo-review-engine.
//!
//! Every failure carries a stable `code()` for API consumers and a
//! `user_message()` meant to be shown as-is to the person who submitted the
//! repository.

use ai_llm_service::AiLlmError;
use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type EngineResult<T> = Result<T, EngineError>;

/// Convenient alias for provider-layer results.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Root error type for the repo-review-engine crate.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input rejected before any network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// GitHub (API or raw host) failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The repository was reachable but nothing reviewable came out of it.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Tree/commit lookup failed for `main` and for the `master` fallback.
    #[error("neither 'main' nor 'master' branch found for {owner}/{repo}: {source}")]
    BranchNotFound {
        owner: String,
        repo: String,
        #[source]
        source: ProviderError,
    },

    /// The review model could not be configured; the branch stops before any request.
    #[error("reviewer unavailable: {0}")]
    ReviewerUnavailable(String),

    /// The review model refused or failed the request.
    #[error(transparent)]
    Review(#[from] AiLlmError),
}

impl EngineError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Validation(e) => e.code(),
            EngineError::Provider(e) => e.code(),
            EngineError::Selection(e) => e.code(),
            EngineError::BranchNotFound { .. } => "BRANCH_NOT_FOUND",
            EngineError::ReviewerUnavailable(_) => "LLM_CONFIG_ERROR",
            EngineError::Review(e) => e.code(),
        }
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            EngineError::Validation(e) => e.user_message(),
            EngineError::Provider(e) => e.user_message(),
            EngineError::Selection(e) => e.user_message(),
            EngineError::BranchNotFound { source, .. } => format!(
                "Failed to fetch repository data. Neither 'main' nor 'master' branch found or other API error: {}",
                source.user_message()
            ),
            EngineError::ReviewerUnavailable(msg) => msg.clone(),
            EngineError::Review(e) => e.user_message(),
        }
    }

    /// `true` when the error was raised before contacting any remote service.
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }
}

/// Input validation errors (URL shape, language id).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("repository URL is empty")]
    EmptyUrl,

    #[error("malformed URL '{0}'")]
    MalformedUrl(String),

    #[error("unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("unsupported host '{0}', expected github.com")]
    WrongHost(String),

    #[error("URL '{0}' does not name both owner and repository")]
    MissingOwnerOrRepo(String),

    #[error("unsupported language '{0}'")]
    UnsupportedLanguage(String),
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyUrl
            | ValidationError::MalformedUrl(_)
            | ValidationError::UnsupportedScheme(_)
            | ValidationError::WrongHost(_)
            | ValidationError::MissingOwnerOrRepo(_) => "INVALID_REPOSITORY_URL",
            ValidationError::UnsupportedLanguage(_) => "UNSUPPORTED_LANGUAGE",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ValidationError::EmptyUrl => "Please enter a GitHub repository URL.".to_string(),
            ValidationError::MalformedUrl(_) => {
                "Invalid URL format. Please enter a valid GitHub repository URL.".to_string()
            }
            ValidationError::UnsupportedScheme(_) => {
                "Invalid URL protocol. Please use https:// or http://.".to_string()
            }
            ValidationError::WrongHost(_) => {
                "Please enter a valid GitHub.com repository URL.".to_string()
            }
            ValidationError::MissingOwnerOrRepo(_) => {
                "Invalid GitHub repository URL. Please use a format like https://github.com/owner/repo."
                    .to_string()
            }
            ValidationError::UnsupportedLanguage(lang) => {
                format!("Language '{lang}' is not supported for review.")
            }
        }
    }
}

/// Provider-specific error used inside the GitHub client.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Unauthorized (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403); GitHub uses it for exhausted anonymous rate limits.
    #[error("forbidden")]
    Forbidden,

    /// Not found (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Rate limited (HTTP 429).
    #[error("rate limited")]
    RateLimited {
        /// Optional `Retry-After` hint in seconds when available.
        retry_after_secs: Option<u64>,
    },

    /// Gateway / server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other HTTP status (non-2xx) not covered by specific variants.
    #[error("http status error: status {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without HTTP status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// Unexpected/invalid shape of provider response.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Maps a non-2xx status to the matching variant.
    pub fn from_status(code: u16, retry_after_secs: Option<u64>) -> Self {
        match code {
            401 => ProviderError::Unauthorized,
            403 => ProviderError::Forbidden,
            404 => ProviderError::NotFound,
            429 => ProviderError::RateLimited { retry_after_secs },
            500..=599 => ProviderError::Server(code),
            _ => ProviderError::HttpStatus(code),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound)
    }

    pub fn code(&self) -> &'static str {
        match self {
            ProviderError::Unauthorized => "GITHUB_UNAUTHORIZED",
            ProviderError::Forbidden | ProviderError::RateLimited { .. } => "GITHUB_RATE_LIMITED",
            ProviderError::NotFound => "REPOSITORY_NOT_FOUND",
            ProviderError::Server(_) | ProviderError::HttpStatus(_) => "GITHUB_HTTP_ERROR",
            ProviderError::Timeout => "GITHUB_TIMEOUT",
            ProviderError::Network(_) => "GITHUB_NETWORK_ERROR",
            ProviderError::InvalidResponse(_) => "GITHUB_INVALID_RESPONSE",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ProviderError::NotFound => {
                "Repository or branch not found. Please check the URL and ensure the branch exists."
                    .to_string()
            }
            ProviderError::Forbidden | ProviderError::RateLimited { .. } => {
                "GitHub API rate limit exceeded or access forbidden. Please try again later."
                    .to_string()
            }
            ProviderError::Unauthorized => {
                "GitHub refused the request. Only public repositories can be reviewed.".to_string()
            }
            ProviderError::Server(code) | ProviderError::HttpStatus(code) => {
                format!("Failed to fetch repository data from GitHub (status {code}).")
            }
            ProviderError::Timeout => {
                "GitHub did not answer in time. Please try again later.".to_string()
            }
            ProviderError::Network(e) => format!("Could not reach GitHub: {e}"),
            ProviderError::InvalidResponse(e) => {
                format!("GitHub returned an unexpected response: {e}")
            }
        }
    }
}

/// Nothing reviewable could be assembled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// No file in the tree matched the language after filtering.
    #[error("no {language} files found")]
    NoMatchingFiles {
        language: String,
        extensions: Vec<String>,
    },

    /// Files matched, but every content fetch failed.
    #[error("failed to fetch content for all selected files: {}", .paths.join(", "))]
    AllFetchesFailed { paths: Vec<String> },
}

impl SelectionError {
    pub fn code(&self) -> &'static str {
        match self {
            SelectionError::NoMatchingFiles { .. } => "NO_MATCHING_FILES",
            SelectionError::AllFetchesFailed { .. } => "FILE_FETCH_FAILED",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            SelectionError::NoMatchingFiles {
                language,
                extensions,
            } => format!(
                "No relevant {language} files found in the repository. Supported extensions: {}",
                extensions.join(", ")
            ),
            SelectionError::AllFetchesFailed { paths } => format!(
                "Successfully identified matching files, but failed to fetch content for all selected files: {}. Please check file accessibility or try again.",
                paths.join(", ")
            ),
        }
    }
}

// ===== Mapping from reqwest::Error into ProviderError =====

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ProviderError::Timeout;
        }

        if let Some(status) = e.status() {
            return ProviderError::from_status(status.as_u16(), None);
        }

        if e.is_decode() {
            return ProviderError::InvalidResponse(e.to_string());
        }

        ProviderError::Network(e.to_string())
    }
}

impl From<reqwest::Error> for EngineError {
    fn from(e: reqwest::Error) -> Self {
        EngineError::Provider(ProviderError::from(e))
    }
}
