//! Error types for rampview-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rampview_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Backend unavailable: {message}")]
    BadGateway { message: String },

    #[error("Internal server error")]
    InternalError,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::EmployeeNotFound { id } => ApiError::NotFound { resource: format!("employee {}", id) },
            CoreError::InvalidEmployeeId | CoreError::InvalidCursor { .. } => {
                ApiError::BadRequest { message: error.to_string() }
            }
            CoreError::Backend { message } => ApiError::BadGateway { message },
            other => {
                log::error!(target: "rampview::error", "Unexpected error: {}", other);
                ApiError::InternalError
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
