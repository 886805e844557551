//! Bearer token verification.
//!
//! # Design
//! `TokenVerifier` holds the decoding key for the one process-wide secret and
//! a fixed HS256 validation policy. Verification is a pure function of the
//! token, the secret and the clock. Every decode failure collapses into
//! `AuthError::Invalid`, so a token signed with another secret looks exactly
//! like a malformed one from the outside. The detailed reason only goes to
//! the debug log.

use std::fmt;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::AuthError;
use crate::types::{Principal, UserId};

/// Claims the service reads from a token payload. `exp` is checked by
/// `Validation` and does not need a field here.
#[derive(Debug, Deserialize)]
struct Claims {
    id: UserId,
    #[serde(default)]
    username: String,
    #[serde(default)]
    role: Option<String>,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Principal {
            id: claims.id,
            username: claims.username,
            role: claims.role,
        }
    }
}

#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Builds a verifier for HS256 tokens signed with `secret`.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        validation.leeway = 0;
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verifies `token` and returns the caller it identifies.
    ///
    /// `None` and the empty string are `Missing`. Anything that does not
    /// decode under the configured secret, or is expired, is `Invalid`.
    pub fn verify(&self, token: Option<&str>) -> Result<Principal, AuthError> {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(AuthError::Missing),
        };

        match decode::<Claims>(token, &self.key, &self.validation) {
            Ok(data) => Ok(data.claims.into()),
            Err(err) => {
                tracing::debug!(error = %err, "token rejected");
                Err(AuthError::Invalid)
            }
        }
    }
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .field("key", &"<redacted>")
            .finish()
    }
}
