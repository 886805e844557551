use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use todo_core::{AuthError, ServiceError};

use crate::error::AppError;
use crate::SharedService;

/// Verifies the bearer token and attaches the caller's `Principal` to the
/// request. Any failure stops the request with a 401.
pub async fn require_bearer(
    State(service): State<SharedService>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let principal = bearer_token(request.headers())
        .and_then(|token| service.verifier().verify(token))
        .inspect_err(|err| {
            tracing::debug!(
                reason = %err,
                method = %request.method(),
                path = %request.uri().path(),
                "request rejected"
            );
        })
        .map_err(ServiceError::from)?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Token from `Authorization: Bearer <token>`.
///
/// No header is `Ok(None)`; a header with another scheme or unreadable bytes
/// is `Invalid`.
fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| AuthError::Invalid)?;
    let (scheme, token) = value.split_once(' ').ok_or(AuthError::Invalid)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::Invalid);
    }
    Ok(Some(token.trim()))
}
