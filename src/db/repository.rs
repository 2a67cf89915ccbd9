//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{ListResult, Todo, TodoStats},
    query::{Pagination, TodoFilter},
    validation::{NewTodo, TodoPatch},
};

/// Repository for Todo operations.
pub trait TodoRepository {
    /// Insert a new todo. The store assigns the id and both timestamps.
    fn insert(&self, todo: &NewTodo) -> impl Future<Output = DbResult<Todo>> + Send;

    /// Get a todo by ID.
    fn get(&self, id: &str) -> impl Future<Output = DbResult<Todo>> + Send;

    /// List todos matching `filter`, newest first, one page at a time.
    fn list(
        &self,
        filter: &TodoFilter,
        page: &Pagination,
    ) -> impl Future<Output = DbResult<ListResult<Todo>>> + Send;

    /// Apply a patch and refresh `updated_at` in the same operation.
    fn update(&self, id: &str, patch: &TodoPatch) -> impl Future<Output = DbResult<Todo>> + Send;

    /// Delete a todo by ID.
    fn delete(&self, id: &str) -> impl Future<Output = DbResult<()>> + Send;

    /// Count todos matching `filter`.
    fn count(&self, filter: &TodoFilter) -> impl Future<Output = DbResult<usize>> + Send;

    /// Aggregate counts over the whole collection.
    fn stats(&self) -> impl Future<Output = DbResult<TodoStats>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Todos<'a>: TodoRepository + Send + Sync
    where
        Self: 'a;

    /// Apply pending schema migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the todo repository.
    fn todos(&self) -> Self::Todos<'_>;

    /// Release the underlying connections.
    fn close(&self) -> impl Future<Output = ()> + Send;
}
