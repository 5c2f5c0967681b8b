//! API error type and the JSON error body shared by every endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::project::{AnalysisError, ProjectError};

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    BadRequest {
        message: String,
        field: Option<String>,
    },
    NotFound(String),
    Database(String),
    Detection(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            field: None,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Detection(_) => StatusCode::BAD_GATEWAY,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self) -> ErrorResponse {
        match self {
            ApiError::BadRequest { message, field } => {
                let body = ErrorResponse::new("BAD_REQUEST", message);
                match field {
                    Some(field) => body.with_details(json!({ "field": field })),
                    None => body,
                }
            }
            ApiError::NotFound(msg) => ErrorResponse::new("NOT_FOUND", msg),
            ApiError::Database(msg) => ErrorResponse::new("DATABASE_ERROR", msg),
            ApiError::Detection(msg) => ErrorResponse::new("DETECTION_FAILED", msg),
            ApiError::Internal(msg) => ErrorResponse::new("INTERNAL_ERROR", msg),
        }
    }
}

impl From<ProjectError> for ApiError {
    fn from(err: ProjectError) -> Self {
        let message = err.message();
        match err {
            ProjectError::NotFound(_) => ApiError::NotFound(message),
            ProjectError::ValidationFailed { field, .. } => ApiError::BadRequest {
                message,
                field: Some(field),
            },
            ProjectError::Persistence(_) => ApiError::Database(message),
            ProjectError::Internal(_) => ApiError::Internal(message),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        let message = err.message();
        match err {
            AnalysisError::NotFound(_) => ApiError::NotFound(message),
            AnalysisError::ValidationFailed { field, .. } => ApiError::BadRequest {
                message,
                field: Some(field),
            },
            AnalysisError::Persistence(_) => ApiError::Database(message),
            AnalysisError::Detection(_) => ApiError::Detection(message),
            AnalysisError::Internal(_) => ApiError::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = ?self, "Request failed");
        }
        (status, Json(self.body())).into_response()
    }
}
