//! LLM access for the repository review pipeline.
//!
//! The crate exposes a single [`LlmService`](llm_service::LlmService) that
//! dispatches to a concrete provider client (Gemini or an OpenAI-compatible
//! endpoint), env-driven configuration in [`config`], and one error type
//! ([`AiLlmError`](error_handler::AiLlmError)) whose review failures are
//! classified into user-facing categories.

pub mod config;
pub mod error_handler;
pub mod llm_service;
pub mod services;
pub mod telemetry;

pub use config::{
    default_config::config_from_env, llm_model_config::LlmModelConfig, llm_provider::LlmProvider,
};
pub use error_handler::{AiLlmError, ConfigError, ReviewError, ReviewErrorKind};
pub use llm_service::LlmService;
