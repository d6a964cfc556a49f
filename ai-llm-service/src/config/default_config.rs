//! Review model config loaded strictly from environment variables.
//!
//! # Environment variables
//!
//! - `LLM_KIND`         = provider kind (`gemini` or `openai`, default `gemini`)
//! - `LLM_API_KEY`      = API key (mandatory)
//! - `LLM_MODEL`        = model identifier (mandatory)
//! - `LLM_ENDPOINT`     = API base URL (optional, provider default otherwise)
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (u64, default 120)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, opt_var_u32, opt_var_u64, must_var, validate_http_endpoint},
};

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Builds the review model config from the process environment.
///
/// # Errors
/// - [`ConfigError::MissingVar`](crate::ConfigError::MissingVar) if the key or
///   model is absent
/// - [`ConfigError::UnsupportedProvider`](crate::ConfigError::UnsupportedProvider)
///   for an unknown `LLM_KIND`
/// - [`ConfigError::InvalidNumber`](crate::ConfigError::InvalidNumber) /
///   [`ConfigError::InvalidFormat`](crate::ConfigError::InvalidFormat) for
///   malformed optional values
pub fn config_from_env() -> Result<LlmModelConfig, AiLlmError> {
    config_from_vars(|name| std::env::var(name).ok())
}

/// Same as [`config_from_env`], reading variables through `var`.
pub fn config_from_vars<F>(var: F) -> Result<LlmModelConfig, AiLlmError>
where
    F: Fn(&str) -> Option<String>,
{
    let provider = match var("LLM_KIND").filter(|k| !k.trim().is_empty()) {
        Some(kind) => LlmProvider::from_kind(&kind)?,
        None => LlmProvider::Gemini,
    };

    let api_key = must_var(&var, "LLM_API_KEY")?;
    let model = must_var(&var, "LLM_MODEL")?;

    let endpoint = var("LLM_ENDPOINT")
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| provider.default_endpoint().to_string());
    validate_http_endpoint("LLM_ENDPOINT", &endpoint)?;

    let max_tokens = opt_var_u32(&var, "LLM_MAX_TOKENS")?;
    let timeout_secs = opt_var_u64(&var, "LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.2),
        top_p: None,
        timeout_secs: Some(timeout_secs),
    })
}
