//! Todo storage.
//!
//! # Design
//! `TodoRepository` is the storage contract the service is written against,
//! so a file- or database-backed repository can replace the in-memory one.
//! Implementations must treat content as an opaque value: no query text is
//! ever built from it.
//!
//! `InMemoryTodoStore` keeps the id counter, the records and the per-owner
//! index behind one `RwLock`. Allocating an id and inserting the record
//! happen under the same write guard, so concurrent creates can neither see
//! the same counter value nor lose an insert. Records are keyed by id in a
//! `BTreeMap`; since ids only grow, id order is insertion order.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::StoreError;
use crate::types::{Todo, TodoId, UserId};

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage contract for todo records.
///
/// The repository does not authorize anything. It trusts the `owner_id` it
/// is given; the service decides which owner that is.
pub trait TodoRepository: Send + Sync {
    /// Allocates a fresh id and stores `{id, content, owner_id}`.
    fn create(&self, owner_id: UserId, content: String) -> StoreResult<Todo>;

    /// All records owned by `owner_id`, oldest first.
    fn list_by_owner(&self, owner_id: UserId) -> StoreResult<Vec<Todo>>;

    /// Removes record `id` if it exists and belongs to `owner_id`.
    fn delete_one(&self, id: TodoId, owner_id: UserId) -> StoreResult<Todo>;

    /// Removes every record owned by `owner_id` and returns how many went.
    fn delete_all_by_owner(&self, owner_id: UserId) -> StoreResult<usize>;

    /// Number of records across all owners.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
struct StoreState {
    next_id: TodoId,
    todos: BTreeMap<TodoId, Todo>,
    by_owner: HashMap<UserId, BTreeSet<TodoId>>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            next_id: 1,
            todos: BTreeMap::new(),
            by_owner: HashMap::new(),
        }
    }
}

/// Thread-safe in-memory repository.
#[derive(Debug, Default)]
pub struct InMemoryTodoStore {
    state: RwLock<StoreState>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic can only happen before a guard mutates anything, so a poisoned
    // lock still guards consistent state.
    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TodoRepository for InMemoryTodoStore {
    fn create(&self, owner_id: UserId, content: String) -> StoreResult<Todo> {
        let mut state = self.write();
        let id = state.next_id;
        state.next_id += 1;

        let todo = Todo {
            id,
            content,
            owner_id,
        };
        state.todos.insert(id, todo.clone());
        state.by_owner.entry(owner_id).or_default().insert(id);
        Ok(todo)
    }

    fn list_by_owner(&self, owner_id: UserId) -> StoreResult<Vec<Todo>> {
        let state = self.read();
        let Some(ids) = state.by_owner.get(&owner_id) else {
            return Ok(Vec::new());
        };
        Ok(ids
            .iter()
            .filter_map(|id| state.todos.get(id))
            .cloned()
            .collect())
    }

    fn delete_one(&self, id: TodoId, owner_id: UserId) -> StoreResult<Todo> {
        let mut state = self.write();
        match state.todos.get(&id) {
            Some(todo) if todo.owner_id == owner_id => {}
            _ => return Err(StoreError::NotFound(id)),
        }

        let removed = state.todos.remove(&id).ok_or(StoreError::NotFound(id))?;
        if let Some(ids) = state.by_owner.get_mut(&owner_id) {
            ids.remove(&id);
            if ids.is_empty() {
                state.by_owner.remove(&owner_id);
            }
        }
        Ok(removed)
    }

    fn delete_all_by_owner(&self, owner_id: UserId) -> StoreResult<usize> {
        let mut state = self.write();
        let Some(ids) = state.by_owner.remove(&owner_id) else {
            return Ok(0);
        };
        for id in &ids {
            state.todos.remove(id);
        }
        Ok(ids.len())
    }

    fn len(&self) -> usize {
        self.read().todos.len()
    }
}
