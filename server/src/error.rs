//! Mapping of engine errors onto HTTP responses.
//!
//! Every error body is `{"message": "..."}`. Both kinds of auth failure get
//! the same 401 and the same message, so a caller cannot tell a missing
//! token from a forged one.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use todo_core::error::{EMPTY_CONTENT_MESSAGE, INVALID_TOKEN_MESSAGE};
use todo_core::{ErrorBody, ServiceError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Body(#[from] JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Service(ServiceError::Auth(_)) => {
                (StatusCode::UNAUTHORIZED, INVALID_TOKEN_MESSAGE.to_string())
            }
            AppError::Service(ServiceError::Validation(ValidationError::EmptyContent)) => {
                (StatusCode::BAD_REQUEST, EMPTY_CONTENT_MESSAGE.to_string())
            }
            AppError::Service(ServiceError::Store(err)) => {
                tracing::error!(error = %err, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AppError::Body(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
        };
        (status, Json(ErrorBody::new(message))).into_response()
    }
}
