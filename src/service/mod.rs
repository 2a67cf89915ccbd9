//! Protocol-agnostic todo operations.
//!
//! [`TodoService`] is the single entry point both adapters (REST and MCP)
//! call. It validates input, delegates to the injected [`Database`] and maps
//! storage errors into [`ServiceError`]. It holds no state besides the store
//! handle.

mod error;
mod samples;


use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

pub use error::{STORE_FAILURE_MESSAGE, ServiceError, ServiceResult};
pub use samples::sample_todos;

use crate::db::{
    CreateTodo, Database, NewTodo, Pagination, PriorityBreakdown, Todo, TodoFilter, TodoPatch,
    TodoRepository, UpdateTodo,
};

/// One page of todos plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoPage {
    pub items: Vec<Todo>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl TodoPage {
    fn new(items: Vec<Todo>, total: usize, pagination: &Pagination) -> Self {
        let total_pages = pagination.total_pages(total);
        Self {
            items,
            total,
            page: pagination.page(),
            limit: pagination.limit(),
            total_pages,
            has_next: u64::from(pagination.page()) < total_pages,
            has_prev: pagination.page() > 1,
        }
    }
}

/// Aggregate statistics over all todos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoStatistics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// `completed / total` as a fraction in `0.0..=1.0`; `0.0` when empty.
    pub completion_rate: f64,
    pub by_priority: PriorityBreakdown,
}

/// The todo facade, generic over the storage backend.
pub struct TodoService<D: Database> {
    db: Arc<D>,
}

// Manual Clone impl - only the Arc needs cloning, not D
impl<D: Database> Clone for TodoService<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
        }
    }
}

impl<D: Database> TodoService<D> {
    pub fn new(db: impl Into<Arc<D>>) -> Self {
        Self { db: db.into() }
    }

    /// Access the underlying store.
    pub fn db(&self) -> &D {
        &self.db
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: CreateTodo) -> ServiceResult<Todo> {
        let new = NewTodo::try_from(input)?;
        let todo = self.db.todos().insert(&new).await.map_err(store_error)?;
        debug!(id = %todo.id, "todo created");
        Ok(todo)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> ServiceResult<Todo> {
        self.db.todos().get(id).await.map_err(store_error)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: TodoFilter, pagination: Pagination) -> ServiceResult<TodoPage> {
        let filter = filter.normalized();
        let result = self
            .db
            .todos()
            .list(&filter, &pagination)
            .await
            .map_err(store_error)?;
        debug!(total = result.total, returned = result.items.len(), "todos listed");
        Ok(TodoPage::new(result.items, result.total, &pagination))
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: UpdateTodo) -> ServiceResult<Todo> {
        let patch = TodoPatch::try_from(input)?;
        let todo = self
            .db
            .todos()
            .update(id, &patch)
            .await
            .map_err(store_error)?;
        debug!(id = %todo.id, "todo updated");
        Ok(todo)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        self.db.todos().delete(id).await.map_err(store_error)?;
        debug!(id, "todo deleted");
        Ok(())
    }

    /// Flip the completion flag. A missing id fails before anything is written.
    #[instrument(skip(self))]
    pub async fn toggle(&self, id: &str) -> ServiceResult<Todo> {
        let todos = self.db.todos();
        let current = todos.get(id).await.map_err(store_error)?;
        let todo = todos
            .update(id, &TodoPatch::completed(!current.completed))
            .await
            .map_err(store_error)?;
        debug!(id, completed = todo.completed, "todo toggled");
        Ok(todo)
    }

    pub async fn list_completed(&self, pagination: Pagination) -> ServiceResult<TodoPage> {
        self.list(TodoFilter::completed(true), pagination).await
    }

    pub async fn list_pending(&self, pagination: Pagination) -> ServiceResult<TodoPage> {
        self.list(TodoFilter::completed(false), pagination).await
    }

    pub async fn list_by_tag(&self, tag: &str, pagination: Pagination) -> ServiceResult<TodoPage> {
        self.list(TodoFilter::tagged(tag), pagination).await
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> ServiceResult<TodoStatistics> {
        let stats = self.db.todos().stats().await.map_err(store_error)?;
        let completion_rate = if stats.total == 0 {
            0.0
        } else {
            stats.completed as f64 / stats.total as f64
        };

        Ok(TodoStatistics {
            total: stats.total,
            completed: stats.completed,
            pending: stats.pending,
            completion_rate,
            by_priority: stats.by_priority,
        })
    }
}

/// Convert a store error, logging the ones that are not a plain miss.
fn store_error(e: crate::db::DbError) -> ServiceError {
    let err = ServiceError::from(e);
    if let ServiceError::Store { message } = &err {
        error!(%message, "store operation failed");
    }
    err
}
