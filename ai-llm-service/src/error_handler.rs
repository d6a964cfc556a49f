//! Unified error handling for `ai-llm-service`.
//!
//! This module exposes a single top-level error type [`AiLlmError`] for the whole
//! library, and groups domain-specific errors in nested types ([`ConfigError`],
//! [`ReviewError`]). Small helpers for reading/validating environment variables are
//! provided and return the unified [`Result<T>`] alias.
//!
//! All messages include the suffix `[AI LLM Service]` to simplify attribution in logs.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::llm_provider::LlmProvider;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup, before any request).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Upstream provider refused or failed the review request.
    #[error(transparent)]
    Review(#[from] ReviewError),

    /// Underlying HTTP transport error (e.g., `reqwest::Error`).
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(reqwest::Error),

    /// Operation exceeded the configured timeout.
    #[error("[AI LLM Service] operation timed out after {0:?}")]
    Timeout(Duration),
}

impl AiLlmError {
    /// Message suitable for showing to the person who requested the review.
    pub fn user_message(&self) -> String {
        match self {
            AiLlmError::Config(ConfigError::MissingVar(name)) => format!(
                "{name} environment variable is not set. Please configure it to use the AI features."
            ),
            AiLlmError::Config(e) => format!("AI service is misconfigured: {e}"),
            AiLlmError::Review(e) => e.user_message(),
            AiLlmError::HttpTransport(e) => {
                format!("Failed to get review from AI: {e}")
            }
            AiLlmError::Timeout(after) => format!(
                "The AI service did not answer within {}s. Please try again later.",
                after.as_secs()
            ),
        }
    }

    /// Stable machine-readable code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            AiLlmError::Config(_) => "LLM_CONFIG_ERROR",
            AiLlmError::Review(e) => e.kind.code(),
            AiLlmError::HttpTransport(_) => "LLM_TRANSPORT_ERROR",
            AiLlmError::Timeout(_) => "LLM_TIMEOUT",
        }
    }
}

impl From<reqwest::Error> for AiLlmError {
    fn from(e: reqwest::Error) -> Self {
        AiLlmError::HttpTransport(e)
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[AI LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (limits, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Unsupported provider in `LLM_KIND`.
    #[error("[AI LLM Service] unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `LLM_ENDPOINT`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// The config was handed to a client of a different provider.
    #[error("[AI LLM Service] config for {got:?} passed to {expected:?} client")]
    ProviderMismatch {
        expected: LlmProvider,
        got: LlmProvider,
    },

    /// API key is absent or cannot be used as a header value.
    #[error("[AI LLM Service] API key is missing or invalid")]
    InvalidApiKey,
}

/* ------------------------------------------------------------------------- */
/* Review errors                                                             */
/* ------------------------------------------------------------------------- */

/// Category of a failed review request. Each maps to one user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewErrorKind {
    /// Key rejected by the provider.
    InvalidCredential,
    /// Quota or rate limit exhausted.
    QuotaExceeded,
    /// Provider could not process the request payload.
    MalformedRequest,
    /// Prompt or answer blocked by the provider's safety filters.
    SafetyBlocked,
    /// 2xx answer that carried no text.
    EmptyResponse,
    /// Anything else.
    Unknown,
}

impl ReviewErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidCredential => "LLM_INVALID_CREDENTIAL",
            Self::QuotaExceeded => "LLM_QUOTA_EXCEEDED",
            Self::MalformedRequest => "LLM_MALFORMED_REQUEST",
            Self::SafetyBlocked => "LLM_SAFETY_BLOCKED",
            Self::EmptyResponse => "LLM_EMPTY_RESPONSE",
            Self::Unknown => "LLM_UNKNOWN_ERROR",
        }
    }
}

/// Classified failure of a review request.
#[derive(Debug, Error)]
#[error("[AI LLM Service] {provider:?} review failed ({kind:?}): {detail}")]
pub struct ReviewError {
    pub provider: LlmProvider,
    pub kind: ReviewErrorKind,
    /// HTTP status when the failure came from a non-2xx answer.
    pub status: Option<StatusCode>,
    /// Short body snippet or decoder message.
    pub detail: String,
}

impl ReviewError {
    pub fn new(provider: LlmProvider, kind: ReviewErrorKind, detail: impl Into<String>) -> Self {
        Self {
            provider,
            kind,
            status: None,
            detail: detail.into(),
        }
    }

    /// Builds an error from a non-2xx response, classifying it by status and body.
    pub fn from_status(provider: LlmProvider, status: StatusCode, body: &str) -> Self {
        Self {
            provider,
            kind: classify_failure(status, body),
            status: Some(status),
            detail: make_snippet(body),
        }
    }

    pub fn user_message(&self) -> String {
        match self.kind {
            ReviewErrorKind::InvalidCredential => {
                "Invalid API Key. Please check your LLM_API_KEY environment variable.".to_string()
            }
            ReviewErrorKind::QuotaExceeded => {
                "API quota exceeded. Please check your AI provider quota or try again later."
                    .to_string()
            }
            ReviewErrorKind::MalformedRequest => format!(
                "The AI model could not process the request, possibly due to the input format or content. Details: {}",
                self.detail
            ),
            ReviewErrorKind::SafetyBlocked => {
                "The code review was blocked due to safety concerns with the input or output content."
                    .to_string()
            }
            ReviewErrorKind::EmptyResponse => {
                "Received no feedback from the AI. The response might be empty or in an unexpected format."
                    .to_string()
            }
            ReviewErrorKind::Unknown => format!("Failed to get review from AI: {}", self.detail),
        }
    }
}

/// Maps an upstream failure to a [`ReviewErrorKind`] using the status code and
/// well-known phrases from the response body.
pub fn classify_failure(status: StatusCode, body: &str) -> ReviewErrorKind {
    let lower = body.to_lowercase();

    if status == StatusCode::UNAUTHORIZED
        || lower.contains("api key not valid")
        || lower.contains("invalid api key")
        || lower.contains("incorrect api key")
    {
        ReviewErrorKind::InvalidCredential
    } else if status == StatusCode::TOO_MANY_REQUESTS || lower.contains("quota") {
        ReviewErrorKind::QuotaExceeded
    } else if lower.contains("blocked due to safety") {
        ReviewErrorKind::SafetyBlocked
    } else if status == StatusCode::BAD_REQUEST || lower.contains("parse input error") {
        ReviewErrorKind::MalformedRequest
    } else {
        ReviewErrorKind::Unknown
    }
}

/// Trims a response body to a short single-line snippet for logs and errors.
pub fn make_snippet(body: &str) -> String {
    const MAX: usize = 300;
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX {
        flat
    } else {
        let cut: String = flat.chars().take(MAX).collect();
        format!("{cut}…")
    }
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Fetches a required, non-empty variable through `var`.
///
/// # Errors
/// Returns [`ConfigError::MissingVar`] if the variable is absent or blank.
pub fn must_var<F>(var: &F, name: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Parses an optional `u32` (`Ok(None)` if unset/empty).
pub fn opt_var_u32<F>(var: &F, name: &'static str) -> Result<Option<u32>>
where
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(v) if !v.trim().is_empty() => v.trim().parse::<u32>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u32",
            })
        }),
        _ => Ok(None),
    }
}

/// Parses an optional `u64` (`Ok(None)` if unset/empty).
pub fn opt_var_u64<F>(var: &F, name: &'static str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(v) if !v.trim().is_empty() => v.trim().parse::<u64>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        _ => Ok(None),
    }
}

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string does not start with
/// a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}
