//! Review LLM service with enum dispatch over the configured provider.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Construction validates the config; no request is made until
//!   [`LlmService::generate`] is called.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::{LlmService, config_from_env};
//!
//! # async fn run() -> Result<(), ai_llm_service::AiLlmError> {
//! let svc = Arc::new(LlmService::from_config(config_from_env()?)?);
//! let review = svc.generate("Review this code: fn main() {}", None).await?;
//! println!("{review}");
//! # Ok(())
//! # }
//! ```

use tracing::debug;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::AiLlmError,
    services::{gemini_service::GeminiService, open_ai_service::OpenAiService},
};

/// Concrete provider client selected from [`LlmModelConfig::provider`].
#[derive(Debug)]
pub enum LlmService {
    Gemini(GeminiService),
    OpenAI(OpenAiService),
}

impl LlmService {
    /// Builds the client matching `cfg.provider`.
    ///
    /// # Errors
    /// Returns [`AiLlmError::Config`] for a missing key or invalid endpoint, and
    /// [`AiLlmError::HttpTransport`] if the HTTP client cannot be built.
    pub fn from_config(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        debug!(provider = ?cfg.provider, model = %cfg.model, "building LLM service");

        Ok(match cfg.provider {
            LlmProvider::Gemini => Self::Gemini(GeminiService::new(cfg)?),
            LlmProvider::OpenAI => Self::OpenAI(OpenAiService::new(cfg)?),
        })
    }

    /// Generates text for `prompt` with an optional system instruction.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the request fails or no text comes back.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        match self {
            Self::Gemini(c) => c.generate(prompt, system).await,
            Self::OpenAI(c) => c.generate(prompt, system).await,
        }
    }

    pub fn provider(&self) -> LlmProvider {
        match self {
            Self::Gemini(_) => LlmProvider::Gemini,
            Self::OpenAI(_) => LlmProvider::OpenAI,
        }
    }
}
