//! In-memory implementation of the database traits.
//!
//! Backed by a [`DashMap`], so concurrent requests never block each other on
//! a global lock. Nothing is persisted; used for `serve --in-memory` and for
//! exercising the service layer without SQLite.

use dashmap::DashMap;

use super::utils::{current_timestamp, generate_entity_id};
use super::{
    Database, DbError, DbResult, ListResult, NewTodo, Pagination, Todo, TodoFilter, TodoPatch,
    TodoRepository, TodoStats,
};

#[derive(Debug, Default)]
pub struct MemoryDatabase {
    todos: DashMap<String, Todo>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Database for MemoryDatabase {
    type Todos<'a> = MemoryTodoRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        Ok(())
    }

    fn todos(&self) -> Self::Todos<'_> {
        MemoryTodoRepository { todos: &self.todos }
    }

    async fn close(&self) {}
}

pub struct MemoryTodoRepository<'a> {
    todos: &'a DashMap<String, Todo>,
}

impl MemoryTodoRepository<'_> {
    /// Matching todos, newest first.
    fn matching(&self, filter: &TodoFilter) -> Vec<Todo> {
        let mut matched: Vec<Todo> = self
            .todos
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        matched
    }
}

impl TodoRepository for MemoryTodoRepository<'_> {
    async fn insert(&self, todo: &NewTodo) -> DbResult<Todo> {
        let now = current_timestamp();
        let created = Todo {
            id: generate_entity_id(),
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
            priority: todo.priority,
            due_date: todo.due_date,
            tags: todo.tags.clone(),
            created_at: now,
            updated_at: now,
        };
        self.todos.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn get(&self, id: &str) -> DbResult<Todo> {
        self.todos
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DbError::todo_not_found(id))
    }

    async fn list(&self, filter: &TodoFilter, page: &Pagination) -> DbResult<ListResult<Todo>> {
        let matched = self.matching(filter);
        let total = matched.len();
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = matched
            .into_iter()
            .skip(offset)
            .take(page.limit() as usize)
            .collect();
        Ok(ListResult { items, total })
    }

    async fn update(&self, id: &str, patch: &TodoPatch) -> DbResult<Todo> {
        // The entry guard holds the shard lock, so the patch and the timestamp
        // land together.
        let mut entry = self
            .todos
            .get_mut(id)
            .ok_or_else(|| DbError::todo_not_found(id))?;
        patch.apply_to(entry.value_mut());
        entry.updated_at = current_timestamp();
        Ok(entry.value().clone())
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        self.todos
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DbError::todo_not_found(id))
    }

    async fn count(&self, filter: &TodoFilter) -> DbResult<usize> {
        Ok(self
            .todos
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .count())
    }

    async fn stats(&self) -> DbResult<TodoStats> {
        let mut stats = TodoStats::default();
        for entry in self.todos.iter() {
            let todo = entry.value();
            stats.total += 1;
            if todo.completed {
                stats.completed += 1;
            }
            stats.by_priority.increment(todo.priority);
        }
        stats.pending = stats.total - stats.completed;
        Ok(stats)
    }
}
