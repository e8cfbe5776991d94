// Callable wire protocol.
//
// Request:  {"data": {"announcementId": "...", "content": "...", "isAnonymous": false}}
// Success:  200 {"result": {"success": true, "commentId": "..."}}
// Failure:  {"error": {"status": "INVALID_ARGUMENT", "message": "..."}}
//           with 400 / 403 / 500 for the three error kinds.

use crate::core::comments::{SubmissionError, SubmissionRequest, SubmissionResult};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;

/// Envelope every callable request arrives in.
#[derive(Debug, Deserialize)]
pub struct CallableRequest {
    pub data: CommentPayload,
}

/// Raw payload. Fields are optional here; emptiness is the pipeline's call.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    #[serde(default)]
    pub announcement_id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub is_anonymous: Option<bool>,
}

impl From<CommentPayload> for SubmissionRequest {
    fn from(payload: CommentPayload) -> Self {
        Self {
            announcement_id: payload.announcement_id.unwrap_or_default(),
            content: payload.content.unwrap_or_default(),
            is_anonymous: payload.is_anonymous.unwrap_or(false),
        }
    }
}

/// Parse a request body. Anything that isn't a well-formed envelope is a bad request.
pub fn parse_request(body: &[u8]) -> Result<SubmissionRequest, CallableError> {
    serde_json::from_slice::<CallableRequest>(body)
        .map(|request| request.data.into())
        .map_err(|e| {
            tracing::warn!(error = %e, "Rejected malformed callable request");
            CallableError::bad_request()
        })
}

/// A callable error as it goes over the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct CallableError {
    pub status: &'static str,
    pub message: String,
    pub http_status: StatusCode,
}

impl CallableError {
    fn bad_request() -> Self {
        Self {
            status: "INVALID_ARGUMENT",
            message: "Bad Request".to_string(),
            http_status: StatusCode::BAD_REQUEST,
        }
    }
}

impl From<SubmissionError> for CallableError {
    fn from(err: SubmissionError) -> Self {
        let (status, http_status) = match err {
            SubmissionError::InvalidArgument(_) => ("INVALID_ARGUMENT", StatusCode::BAD_REQUEST),
            SubmissionError::PermissionDenied(_) => ("PERMISSION_DENIED", StatusCode::FORBIDDEN),
            SubmissionError::Internal => ("INTERNAL", StatusCode::INTERNAL_SERVER_ERROR),
        };
        Self {
            status,
            message: err.to_string(),
            http_status,
        }
    }
}

impl IntoResponse for CallableError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "status": self.status,
                "message": self.message,
            }
        });
        (self.http_status, Json(body)).into_response()
    }
}

/// Wrap a successful submission in the callable result envelope.
pub fn success_response(result: SubmissionResult) -> Response {
    (StatusCode::OK, Json(json!({ "result": result }))).into_response()
}
