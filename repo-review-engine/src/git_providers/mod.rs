//! Git hosting access used by the review and commit pipelines.
//!
//! Only public GitHub repositories are supported: no token is sent, and
//! every call is a single unpaginated GET. The concrete client lives in
//! [`github`]; this module owns its configuration.

pub mod types;
pub use types::*;

pub mod github;
pub use github::GitHubClient;

/// Default REST API base.
pub const GITHUB_API_BASE_URL: &str = "https://api.github.com";

/// Default raw-content host.
pub const GITHUB_RAW_CONTENT_BASE_URL: &str = "https://raw.githubusercontent.com";

/// Per-request timeout when `GITHUB_TIMEOUT_SECS` is unset.
pub const DEFAULT_GITHUB_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration for the GitHub client.
///
/// Usually injected from the environment; tests point both bases at a mock
/// server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// API base, e.g. "https://api.github.com".
    pub base_api: String,
    /// Raw-content base, e.g. "https://raw.githubusercontent.com".
    pub raw_base: String,
    /// Whole-request timeout, connect through body.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_api: GITHUB_API_BASE_URL.to_string(),
            raw_base: GITHUB_RAW_CONTENT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_GITHUB_TIMEOUT_SECS,
        }
    }
}

impl ProviderConfig {
    /// Reads `GITHUB_API_BASE` / `GITHUB_RAW_BASE`, falling back to the public
    /// hosts, and `GITHUB_TIMEOUT_SECS` (zero or unparsable means the default).
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |name: &str, default: &str| {
            var(name)
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            base_api: pick("GITHUB_API_BASE", GITHUB_API_BASE_URL),
            raw_base: pick("GITHUB_RAW_BASE", GITHUB_RAW_CONTENT_BASE_URL),
            timeout_secs: var("GITHUB_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_GITHUB_TIMEOUT_SECS),
        }
    }
}
