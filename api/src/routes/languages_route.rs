use axum::{http::StatusCode, response::Response};
use repo_review_engine::{LanguageSpec, selection::languages};

use crate::core::http::response_envelope::ApiResponse;

/// Catalogue of reviewable languages.
pub async fn languages_route() -> Response {
    let all: &'static [LanguageSpec] = languages::all();
    ApiResponse::success(all).into_response_with_status(StatusCode::OK)
}
