//! # Web API Error Types
//!
//! Defines error types specific to the web API and their HTTP response conversions.
//! Leverages thiserror for structured error handling and Axum's IntoResponse for HTTP conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::error::TodoError;

/// Web API specific errors with HTTP status code mappings
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Carries the database message verbatim to the client.
    #[error("Database operation failed: {message}")]
    DatabaseError { message: String },

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// Create a BadRequest error with a custom message
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a DatabaseError from the underlying failure message
    pub fn database_error(message: impl Into<String>) -> Self {
        Self::DatabaseError {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::DatabaseError { .. } | ApiError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let (error_code, message) = match &self {
            ApiError::BadRequest { message } => ("BAD_REQUEST", message.as_str()),
            ApiError::MethodNotAllowed => ("METHOD_NOT_ALLOWED", "Method not allowed"),
            ApiError::DatabaseError { message } => ("DATABASE_ERROR", message.as_str()),
            ApiError::Internal => ("INTERNAL_ERROR", "Internal server error"),
        };

        if status_code.is_server_error() {
            error!(code = error_code, error = message, "Request failed");
        }

        let error_response = json!({
            "error": {
                "code": error_code,
                "message": message
            }
        });

        (status_code, Json(error_response)).into_response()
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::Validation(message) => ApiError::BadRequest { message },
            TodoError::MethodNotAllowed => ApiError::MethodNotAllowed,
            TodoError::Persistence(e) => ApiError::database_error(e.to_string()),
            TodoError::Migration(_)
            | TodoError::Configuration(_)
            | TodoError::Metrics(_)
            | TodoError::StartupFatal(_) => ApiError::Internal,
        }
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::database_error(err.to_string())
    }
}

/// Result type alias for web API operations
pub type ApiResult<T> = Result<T, ApiError>;
