//! Google Gemini service for review text generation.
//!
//! Endpoint derived from `LlmModelConfig`:
//! - POST {endpoint}/v1beta/models/{model}:generateContent
//!
//! The key is sent in the `x-goog-api-key` header. A 2xx answer without any
//! candidate text is inspected for safety blocks before being reported as
//! an empty response.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ConfigError, ReviewError, ReviewErrorKind},
    services::{api_key, build_http_client, transport_error},
};

/// Thin client for the Gemini `generateContent` API.
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
    timeout: Duration,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::ProviderMismatch`] if `cfg.provider` is not Gemini
    /// - [`ConfigError::InvalidApiKey`] if the key is absent or not a valid header value
    /// - [`ConfigError::InvalidFormat`] if `cfg.endpoint` is invalid
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::Gemini {
            return Err(ConfigError::ProviderMismatch {
                expected: LlmProvider::Gemini,
                got: cfg.provider,
            }
            .into());
        }

        let key = api_key(&cfg)?;
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            header::HeaderValue::from_str(key).map_err(|_| ConfigError::InvalidApiKey)?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let (client, base, timeout) = build_http_client(&cfg, headers)?;
        let url_generate = format!("{base}/v1beta/models/{}:generateContent", cfg.model);

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_generate,
            timeout,
        })
    }

    /// Generates a single answer for `prompt`.
    ///
    /// # Errors
    /// - [`AiLlmError::Review`] classified from non-2xx responses
    /// - [`AiLlmError::Review`] with `SafetyBlocked` when the prompt or the
    ///   only candidate was blocked
    /// - [`AiLlmError::Review`] with `EmptyResponse` when no text came back
    /// - [`AiLlmError::HttpTransport`] / [`AiLlmError::Timeout`] for client failures
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = GenerateContentRequest::from_cfg(&self.cfg, prompt, system);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            has_system = system.is_some(),
            "POST {}", self.url_generate
        );

        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let err = ReviewError::from_status(LlmProvider::Gemini, status, &text);

            error!(
                %status,
                url = %self.url_generate,
                snippet = %err.detail,
                kind = ?err.kind,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "Gemini generateContent returned non-success status"
            );

            return Err(err.into());
        }

        let out: GenerateContentResponse = resp.json().await.map_err(|e| {
            error!(
                error = %e,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode generateContent response"
            );
            ReviewError::new(
                LlmProvider::Gemini,
                ReviewErrorKind::Unknown,
                format!("serde error: {e}; expected `candidates[0].content.parts[0].text`"),
            )
        })?;

        let text = out.into_text().map_err(|kind| {
            warn!(model = %self.cfg.model, ?kind, "Gemini returned no usable text");
            let detail = match kind {
                ReviewErrorKind::SafetyBlocked => "candidate was blocked due to safety",
                _ => "no text in any candidate",
            };
            ReviewError::new(LlmProvider::Gemini, kind, detail)
        })?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            answer_len = text.len(),
            "generateContent completed"
        );

        Ok(text)
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_cfg(cfg: &LlmModelConfig, prompt: &'a str, system: Option<&'a str>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![PartIn { text: prompt }],
            }],
            system_instruction: system.map(|s| Content {
                role: None,
                parts: vec![PartIn { text: s }],
            }),
            generation_config: GenerationConfig {
                temperature: cfg.temperature,
                top_p: cfg.top_p,
                max_output_tokens: cfg.max_tokens,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<PartIn<'a>>,
}

#[derive(Debug, Serialize)]
struct PartIn<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate that has any, or the reason
    /// why none is available.
    fn into_text(self) -> Result<String, ReviewErrorKind> {
        let prompt_blocked = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
            .is_some();

        let mut safety_stop = false;
        for candidate in self.candidates {
            if candidate.finish_reason.as_deref() == Some("SAFETY") {
                safety_stop = true;
            }
            let text: String = candidate
                .content
                .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
                .unwrap_or_default();
            if !text.trim().is_empty() {
                return Ok(text);
            }
        }

        if prompt_blocked || safety_stop {
            Err(ReviewErrorKind::SafetyBlocked)
        } else {
            Err(ReviewErrorKind::EmptyResponse)
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ContentOut>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentOut {
    #[serde(default)]
    parts: Vec<PartOut>,
}

#[derive(Debug, Deserialize)]
struct PartOut {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}
