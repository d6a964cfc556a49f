use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};
use serde::Serialize;

use crate::core::{app_state::AppState, http::response_envelope::ApiResponse};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// `false` when `LLM_*` config is missing; reviews will fail until fixed.
    pub reviewer_ready: bool,
}

pub async fn health_route(State(state): State<Arc<AppState>>) -> Response {
    ApiResponse::success(HealthResponse {
        status: "ok",
        reviewer_ready: state.engine.reviewer_ready(),
    })
    .into_response_with_status(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use ai_llm_service::{AiLlmError, ConfigError, LlmModelConfig, LlmProvider, LlmService};
    use repo_review_engine::{GitHubClient, ProviderConfig, SelectionLimits, SubmissionContext};
    use serde_json::Value;

    use super::*;

    fn state(reviewer: Result<LlmService, AiLlmError>) -> Arc<AppState> {
        let github = GitHubClient::from_config(ProviderConfig::default()).unwrap();
        let engine = SubmissionContext::new(github, reviewer, SelectionLimits::default());
        Arc::new(AppState::new(engine))
    }

    async fn body(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn reports_missing_reviewer_config() {
        let resp = health_route(State(state(Err(AiLlmError::Config(
            ConfigError::MissingVar("LLM_API_KEY"),
        )))))
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let v = body(resp).await;
        assert_eq!(v["success"], true);
        assert_eq!(v["data"]["status"], "ok");
        assert_eq!(v["data"]["reviewer_ready"], false);
    }

    #[tokio::test]
    async fn reports_configured_reviewer() {
        let reviewer = LlmService::from_config(LlmModelConfig {
            provider: LlmProvider::Gemini,
            model: "gemini-test".into(),
            endpoint: "http://127.0.0.1:9".into(),
            api_key: Some("AIza-test".into()),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(5),
        });

        let v = body(health_route(State(state(reviewer))).await).await;
        assert_eq!(v["data"]["reviewer_ready"], true);
    }
}
