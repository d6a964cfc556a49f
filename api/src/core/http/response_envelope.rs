use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Envelope shared by every endpoint: `data` on success, `error` otherwise.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Stable, machine-readable code (e.g. "INVALID_REPOSITORY_URL").
    pub code: &'static str,
    /// Message meant to be shown to the user as-is.
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ApiErrorDetail>,
}

/// Points the client at the offending request field.
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// Field name, e.g. `repo_url`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ApiErrorDetail {
    pub fn field(path: &str, hint: impl Into<String>) -> Self {
        Self {
            path: Some(path.to_string()),
            hint: Some(hint.into()),
        }
    }
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(
        code: &'static str,
        message: impl Into<String>,
        details: Vec<ApiErrorDetail>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
                details,
            }),
        }
    }

    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_envelope_omits_data_and_empty_details() {
        let v = serde_json::to_value(ApiResponse::<()>::error("NOT_FOUND", "nothing yet", vec![]))
            .unwrap();
        assert_eq!(
            v,
            json!({ "success": false, "error": { "code": "NOT_FOUND", "message": "nothing yet" } })
        );
    }

    #[test]
    fn success_envelope_carries_data() {
        let v = serde_json::to_value(ApiResponse::success(json!({ "status": "ok" }))).unwrap();
        assert_eq!(v["success"], true);
        assert_eq!(v["data"]["status"], "ok");
        assert!(v.get("error").is_none());
    }
}
