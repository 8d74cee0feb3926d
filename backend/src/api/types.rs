//! REST API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use uuid::Uuid;

use super::logs::{log_error, log_warning};
use crate::error::LookupError;

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Unique identifier to correlate with server logs
    pub request_id: String,
    /// Always "error"
    pub status: String,
    /// Machine-readable code, e.g. "not_found"
    pub code: String,
    /// Human-readable message naming the offending input
    pub error: String,
}

/// Banner returned by `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
    pub version: String,
}

/// Create an error response body
pub fn error_response(code: &str, error: &str) -> ErrorResponse {
    ErrorResponse {
        request_id: Uuid::new_v4().to_string(),
        status: "error".to_string(),
        code: code.to_string(),
        error: error.to_string(),
    }
}

/// HTTP status for a lookup error.
pub fn status_for(err: &LookupError) -> StatusCode {
    match err {
        LookupError::InvalidInput { .. } | LookupError::UnsupportedLanguage(_) => {
            StatusCode::BAD_REQUEST
        }
        LookupError::NotFound { .. } => StatusCode::NOT_FOUND,
        LookupError::Dataset(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Lookup error carried out of a handler.
#[derive(Debug)]
pub struct ApiError(pub LookupError);

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let body = error_response(self.0.code(), &self.0.to_string());

        if self.0.is_client_error() {
            log_warning(format!("{} [{}] {}", status.as_u16(), body.request_id, body.error));
        } else {
            log_error(format!("{} [{}] {}", status.as_u16(), body.request_id, body.error));
        }

        (status, Json(body)).into_response()
    }
}
