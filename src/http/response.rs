//! Response encoding and error mapping.
//!
//! # Design Decisions
//! - Every error body is `{"error": "<message>"}`
//! - Client mistakes map to 400, missing documents or fields to 404,
//!   broken storage to 500

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::StoreError;

impl StoreError {
    /// HTTP status for this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::MissingInput(_)
            | StoreError::MalformedAddress(_)
            | StoreError::InvalidDocumentId { .. }
            | StoreError::ValidationRejected(_)
            | StoreError::InvalidValidatorPattern { .. } => StatusCode::BAD_REQUEST,
            StoreError::DocumentNotFound(_) | StoreError::FieldNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            StoreError::MalformedDocument { .. } | StoreError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            StoreError::ValidationRejected(rejection) => json!({
                "error": self.to_string(),
                "details": rejection,
            }),
            StoreError::InvalidValidatorPattern { reason, .. } => json!({
                "error": self.to_string(),
                "details": reason,
            }),
            // Storage internals stay in the logs.
            StoreError::Storage(_) => json!({ "error": "storage error" }),
            _ => json!({ "error": self.to_string() }),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }
        (status, Json(body)).into_response()
    }
}
