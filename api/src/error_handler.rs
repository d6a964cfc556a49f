use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use repo_review_engine::{EngineError, ValidationError};
use thiserror::Error;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / pipeline ---
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("{0}")]
    NotFound(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Engine(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            AppError::Engine(EngineError::Provider(_) | EngineError::BranchNotFound { .. }) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MissingEnv(_) | AppError::Bind { .. } | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingEnv(_) => "MISSING_ENV",
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Engine(e) => e.code(),
            AppError::NotFound(_) => "NOT_FOUND",
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Engine(e) => e.user_message(),
            other => other.to_string(),
        }
    }

    fn details(&self) -> Vec<ApiErrorDetail> {
        match self {
            AppError::Engine(EngineError::Validation(v)) => {
                let field = match v {
                    ValidationError::UnsupportedLanguage(_) => "language",
                    _ => "repo_url",
                };
                vec![ApiErrorDetail::field(field, v.to_string())]
            }
            _ => Vec::new(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        ApiResponse::<()>::error(self.error_code(), self.message(), self.details())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
