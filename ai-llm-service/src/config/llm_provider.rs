use crate::error_handler::{AiLlmError, ConfigError};

/// Represents the provider (backend) used for code review generation.
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmProvider;
///
/// let provider = LlmProvider::from_kind("gemini").unwrap();
/// assert_eq!(provider, LlmProvider::Gemini);
/// assert_eq!(provider.default_endpoint(), "https://generativelanguage.googleapis.com");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Google Gemini `generateContent` API.
    Gemini,
    /// OpenAI chat completions API (or any compatible server).
    OpenAI,
}

impl LlmProvider {
    /// Parses the value of `LLM_KIND` (case-insensitive).
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedProvider`] for unknown kinds.
    pub fn from_kind(kind: &str) -> Result<Self, AiLlmError> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "openai" | "chatgpt" => Ok(Self::OpenAI),
            other => Err(ConfigError::UnsupportedProvider(other.to_string()).into()),
        }
    }

    /// Public base URL used when `LLM_ENDPOINT` is not set.
    pub fn default_endpoint(self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelanguage.googleapis.com",
            Self::OpenAI => "https://api.openai.com",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() {
        assert_eq!(LlmProvider::from_kind("Gemini").unwrap(), LlmProvider::Gemini);
        assert_eq!(LlmProvider::from_kind(" openai ").unwrap(), LlmProvider::OpenAI);
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = LlmProvider::from_kind("ollama").unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::UnsupportedProvider(ref k)) if k == "ollama"
        ));
    }
}
