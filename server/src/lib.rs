//! HTTP boundary for the todo engine.
//!
//! Every route sits behind `require_bearer`, which runs before any body or
//! path extraction, so an unauthenticated request is rejected with 401 no
//! matter what else is wrong with it.

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    middleware,
    routing::{delete, get},
    Extension, Json, Router,
};
use tokio::net::TcpListener;
use todo_core::{
    CreateTodo, DeleteResponse, InMemoryTodoStore, Principal, Todo, TodoId, TodoService,
    TokenVerifier,
};

use crate::error::AppError;

pub type SharedService = Arc<TodoService<InMemoryTodoStore>>;

/// Service backed by a fresh in-memory store, verifying tokens against
/// `jwt_secret`.
pub fn service(jwt_secret: &str) -> SharedService {
    Arc::new(TodoService::new(
        TokenVerifier::new(jwt_secret),
        InMemoryTodoStore::new(),
    ))
}

pub fn app(service: SharedService) -> Router {
    Router::new()
        .route(
            "/todos",
            get(list_todos).post(create_todo).delete(delete_all_todos),
        )
        .route("/todos/{id}", delete(delete_todo))
        .route_layer(middleware::from_fn_with_state(
            service.clone(),
            auth::require_bearer,
        ))
        .with_state(service)
}

pub async fn run(listener: TcpListener, service: SharedService) -> Result<(), std::io::Error> {
    axum::serve(listener, app(service)).await
}

async fn list_todos(
    State(service): State<SharedService>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<Todo>>, AppError> {
    Ok(Json(service.list_as(&principal)?))
}

async fn create_todo(
    State(service): State<SharedService>,
    Extension(principal): Extension<Principal>,
    input: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<Json<Todo>, AppError> {
    let Json(input) = input?;
    Ok(Json(service.create_as(&principal, &input.content)?))
}

async fn delete_todo(
    State(service): State<SharedService>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<TodoId>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = service.delete_one_as(&principal, id)?;
    Ok(Json(DeleteResponse { deleted }))
}

async fn delete_all_todos(
    State(service): State<SharedService>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = service.delete_all_as(&principal)?;
    tracing::info!(owner_id = principal.id, deleted, "deleted all todos");
    Ok(Json(DeleteResponse { deleted }))
}
