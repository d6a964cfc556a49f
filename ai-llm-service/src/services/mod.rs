pub mod gemini_service;
pub mod open_ai_service;

use std::time::Duration;

use reqwest::header::HeaderMap;

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, ConfigError, validate_http_endpoint},
};

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Shared constructor checks for provider clients: API key presence, endpoint
/// scheme, and a `reqwest::Client` with timeout and the given default headers.
///
/// Returns the client, the endpoint without a trailing slash, and the timeout.
pub(crate) fn build_http_client(
    cfg: &LlmModelConfig,
    headers: HeaderMap,
) -> Result<(reqwest::Client, String, Duration), AiLlmError> {
    let endpoint = cfg.endpoint.trim();
    validate_http_endpoint("LLM_ENDPOINT", endpoint)?;

    let timeout = Duration::from_secs(cfg.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .build()?;

    Ok((client, endpoint.trim_end_matches('/').to_string(), timeout))
}

/// Returns the non-empty API key of `cfg`.
pub(crate) fn api_key(cfg: &LlmModelConfig) -> Result<&str, AiLlmError> {
    cfg.api_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ConfigError::InvalidApiKey.into())
}

/// Converts a transport failure, keeping timeouts distinguishable.
pub(crate) fn transport_error(e: reqwest::Error, timeout: Duration) -> AiLlmError {
    if e.is_timeout() {
        AiLlmError::Timeout(timeout)
    } else {
        AiLlmError::HttpTransport(e)
    }
}
