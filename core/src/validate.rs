//! Content validation for new todos.
//!
//! Emptiness is the only rejection. Content is an opaque value all the way
//! down to the store and is never spliced into a query or command, so
//! punctuation of any kind (quotes, semicolons, comment markers) is valid and
//! comes back exactly as it was sent.

use crate::error::ValidationError;

/// Rejects empty and whitespace-only content.
pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    Ok(())
}
