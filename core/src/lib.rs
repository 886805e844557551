//! Authenticated todo engine.
//!
//! # Overview
//! Verifies bearer tokens, validates content and stores per-user todos in a
//! repository that stays consistent under concurrent writers. The engine is
//! synchronous and has no runtime dependency; the HTTP boundary lives in the
//! `todo-server` crate.
//!
//! # Design
//! - `TokenVerifier` turns a raw token into a `Principal` or an `AuthError`.
//! - `validate_content` rejects empty content and nothing else.
//! - `TodoRepository` is the storage contract; `InMemoryTodoStore` is the
//!   lock-guarded implementation.
//! - `TodoService` runs auth, validation and storage in that order.
//! - `TodoClient` builds `HttpRequest`s and parses `HttpResponse`s for hosts
//!   that talk to the service over HTTP (host-does-IO).

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod service;
pub mod store;
pub mod types;
pub mod validate;

pub use auth::TokenVerifier;
pub use client::TodoClient;
pub use error::{ApiError, AuthError, ServiceError, StoreError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::TodoService;
pub use store::{InMemoryTodoStore, TodoRepository};
pub use types::{CreateTodo, DeleteResponse, ErrorBody, Principal, Todo, TodoId, UserId};
pub use validate::validate_content;
