//! Authenticated todo operations.
//!
//! # Design
//! `TodoService` combines the verifier, the content check and a repository
//! into the four operations callers see: create, list, delete-one and
//! delete-all. Each operation comes in two forms:
//!
//! - `create`, `list`, `delete_one`, `delete_all` take the raw bearer token
//!   and verify it first.
//! - `create_as`, `list_as`, `delete_one_as`, `delete_all_as` take a
//!   `Principal` that a request-boundary layer has already verified.
//!
//! Checks run in a fixed order (auth, then validation, then storage) and a
//! failed check returns before the repository is touched. Deleting an absent
//! record, or one owned by somebody else, succeeds with nothing removed.

use crate::auth::TokenVerifier;
use crate::error::{ServiceError, StoreError};
use crate::store::TodoRepository;
use crate::types::{Principal, Todo, TodoId};
use crate::validate::validate_content;

pub type ServiceResult<T> = Result<T, ServiceError>;

pub struct TodoService<R: TodoRepository> {
    verifier: TokenVerifier,
    repo: R,
}

impl<R: TodoRepository> TodoService<R> {
    pub fn new(verifier: TokenVerifier, repo: R) -> Self {
        Self { verifier, repo }
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Verifies `token` and returns the caller.
    pub fn authenticate(&self, token: Option<&str>) -> ServiceResult<Principal> {
        Ok(self.verifier.verify(token)?)
    }

    pub fn create(&self, token: Option<&str>, content: &str) -> ServiceResult<Todo> {
        let principal = self.authenticate(token)?;
        self.create_as(&principal, content)
    }

    pub fn list(&self, token: Option<&str>) -> ServiceResult<Vec<Todo>> {
        let principal = self.authenticate(token)?;
        self.list_as(&principal)
    }

    /// Returns how many records were removed (0 or 1).
    pub fn delete_one(&self, token: Option<&str>, id: TodoId) -> ServiceResult<usize> {
        let principal = self.authenticate(token)?;
        self.delete_one_as(&principal, id)
    }

    pub fn delete_all(&self, token: Option<&str>) -> ServiceResult<usize> {
        let principal = self.authenticate(token)?;
        self.delete_all_as(&principal)
    }

    pub fn create_as(&self, principal: &Principal, content: &str) -> ServiceResult<Todo> {
        validate_content(content)?;
        let todo = self.repo.create(principal.id, content.to_string())?;
        tracing::debug!(owner_id = principal.id, todo_id = todo.id, "todo created");
        Ok(todo)
    }

    pub fn list_as(&self, principal: &Principal) -> ServiceResult<Vec<Todo>> {
        Ok(self.repo.list_by_owner(principal.id)?)
    }

    pub fn delete_one_as(&self, principal: &Principal, id: TodoId) -> ServiceResult<usize> {
        match self.repo.delete_one(id, principal.id) {
            Ok(_) => {
                tracing::debug!(owner_id = principal.id, todo_id = id, "todo deleted");
                Ok(1)
            }
            Err(StoreError::NotFound(_)) => {
                tracing::debug!(owner_id = principal.id, todo_id = id, "delete of absent todo");
                Ok(0)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn delete_all_as(&self, principal: &Principal) -> ServiceResult<usize> {
        let removed = self.repo.delete_all_by_owner(principal.id)?;
        tracing::debug!(owner_id = principal.id, removed, "todos deleted");
        Ok(removed)
    }
}
