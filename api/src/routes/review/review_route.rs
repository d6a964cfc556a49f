use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use repo_review_engine::run_submission;
use tracing::{debug, info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppError,
    routes::review::{review_request::ReviewRequest, review_response::ReviewResponse},
};

/// Runs a review and a commit-history grouping for one repository.
///
/// Validation failures (URL shape, unknown language) answer 400 before any
/// upstream call. Otherwise the answer is 200 and each branch carries its own
/// success or failure.
#[instrument(
    name = "review_route",
    skip(state, headers, body),
    fields(repo_url = %body.repo_url, language = %body.language)
)]
pub async fn review_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<ReviewRequest>,
) -> Response {
    if let Some(id) = headers.get("X-Request-Id").and_then(|h| h.to_str().ok()) {
        debug!(%id, "request id attached");
    }

    let ticket = state.tracker.begin();

    let report = match run_submission(&state.engine, &body.repo_url, &body.language).await {
        Ok(r) => r,
        Err(e) => return AppError::from(e).into_response(),
    };

    let stored = state.tracker.publish(ticket, report.clone()).await;
    info!(
        generation = ticket.generation(),
        superseded = !stored,
        "review request finished"
    );

    ApiResponse::success(ReviewResponse {
        generation: ticket.generation(),
        superseded: !stored,
        report,
    })
    .into_response_with_status(StatusCode::OK)
}
