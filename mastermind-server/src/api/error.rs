use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mastermind_types::{ErrorCategory, ErrorResponse};

use crate::error::GenerateError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    InternalError(String),
    /// A failed generation, reported with its category
    Generate(GenerateError),
}

impl ApiError {
    fn parts(self) -> (StatusCode, &'static str, Option<String>, Option<ErrorCategory>) {
        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", Some(msg), None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", Some(msg), None),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    Some("An unexpected error occurred".to_string()),
                    None,
                )
            }
            ApiError::Generate(err) => {
                let category = err.category();
                let (status, message) = match &err {
                    GenerateError::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
                    GenerateError::MissingInputs => (StatusCode::BAD_REQUEST, "Bad Request"),
                    GenerateError::Store(e) => {
                        tracing::error!("Week generation failed: {}", e);
                        (StatusCode::INTERNAL_SERVER_ERROR, "Store Error")
                    }
                };
                // Store messages are passed through verbatim
                (status, message, Some(err.to_string()), Some(category))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details, category) = self.parts();

        let error_response = ErrorResponse {
            error: message.to_string(),
            details,
            category,
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<GenerateError> for ApiError {
    fn from(err: GenerateError) -> Self {
        ApiError::Generate(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(format!("{:#}", err))
    }
}
