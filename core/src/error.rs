//! Error types for the todo engine and its HTTP client.
//!
//! # Design
//! Each stage of a request has its own error enum so the service can report
//! which stage rejected it. `AuthError` keeps `Missing` and `Invalid` apart for
//! logging, but the HTTP boundary renders both as the same 401. `StoreError`
//! never reaches a caller of the four service operations: deleting an absent
//! record is absorbed as success.
//!
//! `ApiError` is the client-side view of a non-success response.

use thiserror::Error;

use crate::types::TodoId;

/// Message sent to the caller for every authentication failure.
pub const INVALID_TOKEN_MESSAGE: &str = "invalid token";

/// Message sent to the caller when content is empty.
pub const EMPTY_CONTENT_MESSAGE: &str = "Content cannot be empty";

/// Bearer token verification failure.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No token was presented.
    #[error("no authorization token was found")]
    Missing,

    /// Bad signature, wrong secret, malformed or expired token.
    #[error("invalid token")]
    Invalid,
}

/// Content rejected before it reaches storage.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Content cannot be empty")]
    EmptyContent,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("todo {0} not found")]
    NotFound(TodoId),

    /// Backend failure of a non-memory repository.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Outcome of a failed service operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors returned by `TodoClient` parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 401.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// The server returned 400.
    #[error("bad request: {message}")]
    BadRequest { message: String },

    /// Any other non-success status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
