//! Domain types for the todo service.
//!
//! # Design
//! `Todo` is the stored record and also the wire shape returned to clients.
//! The owner field is serialized as `userId` so a caller can check that every
//! listed item belongs to it. `Principal` is built once from a verified token
//! and passed explicitly down the call chain; it is never persisted.

use serde::{Deserialize, Serialize};

/// Identifier issued by the store. Monotonic and never reused.
pub type TodoId = u64;

/// Numeric user identity carried in the bearer token's `id` claim.
pub type UserId = i64;

/// A single todo item owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub content: String,
    #[serde(rename = "userId")]
    pub owner_id: UserId,
}

/// Request payload for creating a todo.
///
/// A missing `content` field becomes the empty string so that it is rejected
/// by content validation rather than by the JSON layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub content: String,
}

impl CreateTodo {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Response payload for both delete operations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    pub deleted: usize,
}

/// Body of every error response: `{"message": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The verified caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub username: String,
    pub role: Option<String>,
}
