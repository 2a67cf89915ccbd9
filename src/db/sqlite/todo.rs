//! SQLite TodoRepository implementation.

use std::str::FromStr;

use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use super::helpers::{ORDER_CLAUSE, build_limit_offset_clause, build_where_clause, fold_case};
use crate::db::utils::{current_timestamp, format_timestamp, generate_entity_id, parse_timestamp};
use crate::db::{
    DbError, DbResult, ListResult, NewTodo, Pagination, Priority, PriorityBreakdown, Todo,
    TodoFilter, TodoPatch, TodoRepository, TodoStats,
};

const COLUMNS: &str =
    "id, title, description, completed, priority, due_date, tags, created_at, updated_at";

/// SQLx-backed todo repository.
pub struct SqliteTodoRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> TodoRepository for SqliteTodoRepository<'a> {
    async fn insert(&self, todo: &NewTodo) -> DbResult<Todo> {
        let id = generate_entity_id();
        let now = current_timestamp();
        let timestamp = format_timestamp(&now);
        let tags_json = serde_json::to_string(&todo.tags).unwrap_or_else(|_| "[]".to_string());

        sqlx::query(
            r#"
            INSERT INTO todo (id, title, description, completed, priority, due_date, tags,
                              created_at, updated_at, title_folded, description_folded)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.completed)
        .bind(todo.priority.as_str())
        .bind(todo.due_date.as_ref().map(format_timestamp))
        .bind(&tags_json)
        .bind(&timestamp)
        .bind(&timestamp)
        .bind(fold_case(&todo.title))
        .bind(fold_case(todo.description.as_deref().unwrap_or_default()))
        .execute(self.pool)
        .await?;

        Ok(Todo {
            id,
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
            priority: todo.priority,
            due_date: todo.due_date,
            tags: todo.tags.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn get(&self, id: &str) -> DbResult<Todo> {
        let row = sqlx::query(&format!("SELECT {} FROM todo WHERE id = ?", COLUMNS))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        let row = row.ok_or_else(|| DbError::todo_not_found(id))?;
        row_to_todo(&row)
    }

    async fn list(&self, filter: &TodoFilter, page: &Pagination) -> DbResult<ListResult<Todo>> {
        let (where_clause, bind_values) = build_where_clause(filter);
        let limit_clause = build_limit_offset_clause(page);

        let sql = format!(
            "SELECT {} FROM todo {} {} {}",
            COLUMNS, where_clause, ORDER_CLAUSE, limit_clause
        );

        // Get paginated results
        let mut query_builder = sqlx::query(&sql);
        for value in &bind_values {
            query_builder = query_builder.bind(value);
        }

        let rows = query_builder.fetch_all(self.pool).await?;
        let items = rows.iter().map(row_to_todo).collect::<DbResult<Vec<_>>>()?;

        let total = self.count(filter).await?;

        Ok(ListResult { items, total })
    }

    async fn update(&self, id: &str, patch: &TodoPatch) -> DbResult<Todo> {
        let updated_at = format_timestamp(&current_timestamp());

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE todo SET ");
        let mut assignments = builder.separated(", ");

        if let Some(title) = &patch.title {
            assignments.push("title = ").push_bind_unseparated(title.clone());
            assignments
                .push("title_folded = ")
                .push_bind_unseparated(fold_case(title));
        }
        if let Some(description) = &patch.description {
            assignments
                .push("description = ")
                .push_bind_unseparated(description.clone());
            assignments
                .push("description_folded = ")
                .push_bind_unseparated(fold_case(description.as_deref().unwrap_or_default()));
        }
        if let Some(completed) = patch.completed {
            assignments
                .push("completed = ")
                .push_bind_unseparated(completed);
        }
        if let Some(priority) = patch.priority {
            assignments
                .push("priority = ")
                .push_bind_unseparated(priority.as_str());
        }
        if let Some(due_date) = &patch.due_date {
            assignments
                .push("due_date = ")
                .push_bind_unseparated(due_date.as_ref().map(format_timestamp));
        }
        if let Some(tags) = &patch.tags {
            let tags_json = serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string());
            assignments.push("tags = ").push_bind_unseparated(tags_json);
        }
        assignments
            .push("updated_at = ")
            .push_bind_unseparated(updated_at);

        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" RETURNING ").push(COLUMNS);

        let row = builder.build().fetch_optional(self.pool).await?;

        let row = row.ok_or_else(|| DbError::todo_not_found(id))?;
        row_to_todo(&row)
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM todo WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::todo_not_found(id));
        }

        Ok(())
    }

    async fn count(&self, filter: &TodoFilter) -> DbResult<usize> {
        let (where_clause, bind_values) = build_where_clause(filter);
        let count_sql = format!("SELECT COUNT(*) FROM todo {}", where_clause);

        let mut count_query = sqlx::query_scalar(&count_sql);
        for value in &bind_values {
            count_query = count_query.bind(value);
        }

        let total: i64 = count_query.fetch_one(self.pool).await?;
        Ok(total as usize)
    }

    async fn stats(&self) -> DbResult<TodoStats> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) AS total,
                COALESCE(SUM(CASE WHEN completed = 1 THEN 1 ELSE 0 END), 0) AS completed,
                COALESCE(SUM(CASE WHEN priority = 'low' THEN 1 ELSE 0 END), 0) AS low,
                COALESCE(SUM(CASE WHEN priority = 'medium' THEN 1 ELSE 0 END), 0) AS medium,
                COALESCE(SUM(CASE WHEN priority = 'high' THEN 1 ELSE 0 END), 0) AS high
            FROM todo
            "#,
        )
        .fetch_one(self.pool)
        .await?;

        let total = row.try_get::<i64, _>("total")? as usize;
        let completed = row.try_get::<i64, _>("completed")? as usize;

        Ok(TodoStats {
            total,
            completed,
            pending: total - completed,
            by_priority: PriorityBreakdown {
                low: row.try_get::<i64, _>("low")? as usize,
                medium: row.try_get::<i64, _>("medium")? as usize,
                high: row.try_get::<i64, _>("high")? as usize,
            },
        })
    }
}

/// Convert a database row to a Todo model.
fn row_to_todo(row: &sqlx::sqlite::SqliteRow) -> DbResult<Todo> {
    let priority_str: String = row.try_get("priority")?;
    let priority = Priority::from_str(&priority_str).map_err(|e| DbError::InvalidData {
        message: e,
        help: "priority must be stored as low, medium or high".to_string(),
    })?;

    let tags_json: String = row.try_get("tags")?;
    let tags: Vec<String> =
        serde_json::from_str(&tags_json).map_err(|e| DbError::InvalidData {
            message: format!("invalid tags '{}': {}", tags_json, e),
            help: "tags are stored as a JSON array of strings".to_string(),
        })?;

    let due_date: Option<String> = row.try_get("due_date")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Todo {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        completed: row.try_get("completed")?,
        priority,
        due_date: due_date.as_deref().map(parse_timestamp).transpose()?,
        tags,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
