use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppError,
};

/// Latest stored report, or 404 before the first submission completes.
#[instrument(name = "latest_review_route", skip(state))]
pub async fn latest_review_route(State(state): State<Arc<AppState>>) -> Response {
    match state.tracker.latest().await {
        Some(report) => ApiResponse::success(report).into_response_with_status(StatusCode::OK),
        None => AppError::NotFound("No review has been completed yet.".into()).into_response(),
    }
}
