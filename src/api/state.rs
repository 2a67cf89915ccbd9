//! Application state for the API server.

use std::sync::Arc;

use crate::db::Database;
use crate::service::TodoService;

/// Shared application state.
///
/// Generic over `D: Database` so handlers run against SQLite in production
/// and against any other backend in tests.
pub struct AppState<D: Database> {
    service: TodoService<D>,
}

// Manual Clone impl - TodoService clones its Arc, D itself need not be Clone
impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<D: Database> AppState<D> {
    pub fn new(db: impl Into<Arc<D>>) -> Self {
        Self {
            service: TodoService::new(db),
        }
    }

    /// Get a reference to the todo service.
    pub fn service(&self) -> &TodoService<D> {
        &self.service
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        self.service.db()
    }
}
