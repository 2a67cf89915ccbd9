//! Todo tool implementations
//!
//! Each tool is a thin wrapper around one [`TodoService`] call. Successful
//! calls return a JSON text payload with `"success": true`; facade failures
//! become tool-level errors (`is_error`) carrying `{"error": "..."}` so agents
//! can read and react to them.

use rmcp::{
    ErrorData as McpError,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content},
    schemars, tool, tool_router,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, warn};

use crate::db::{CreateTodo, Database, Pagination, TodoFilter, UpdateTodo, parse_priority};
use crate::service::{ServiceError, TodoPage, TodoService};

use super::server::McpServer;

// =============================================================================
// Parameter types
// =============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateTodoParams {
    #[schemars(description = "Title of the todo (required, at most 200 characters)")]
    pub title: String,
    #[schemars(description = "Longer description (optional, at most 1000 characters)")]
    pub description: Option<String>,
    #[schemars(description = "Priority: low, medium or high (default medium)")]
    pub priority: Option<String>,
    #[schemars(description = "Due date as YYYY-MM-DD or an RFC 3339 timestamp (optional)")]
    pub due_date: Option<String>,
    #[schemars(description = "Tags used to categorize the todo (optional)")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct GetTodosParams {
    #[schemars(description = "Page number, starting at 1 (default 1)")]
    pub page: Option<u32>,
    #[schemars(description = "Todos per page, 1-100 (default 10)")]
    pub limit: Option<u32>,
    #[schemars(description = "Filter by completion status")]
    pub completed: Option<bool>,
    #[schemars(description = "Filter by priority: low, medium or high")]
    pub priority: Option<String>,
    #[schemars(description = "Only todos carrying this tag")]
    pub tag: Option<String>,
    #[schemars(description = "Case-insensitive search in title and description")]
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TodoIdParams {
    #[schemars(description = "ID of the todo")]
    pub todo_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateTodoParams {
    #[schemars(description = "ID of the todo to update")]
    pub todo_id: String,
    #[schemars(description = "New title")]
    pub title: Option<String>,
    #[schemars(description = "New description; an empty string clears it")]
    pub description: Option<String>,
    #[schemars(description = "New completion status")]
    pub completed: Option<bool>,
    #[schemars(description = "New priority: low, medium or high")]
    pub priority: Option<String>,
    #[schemars(description = "New due date (YYYY-MM-DD or RFC 3339); an empty string clears it")]
    pub due_date: Option<String>,
    #[schemars(description = "Replacement list of tags")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct PageParams {
    #[schemars(description = "Page number, starting at 1 (default 1)")]
    pub page: Option<u32>,
    #[schemars(description = "Todos per page, 1-100 (default 10)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TagParams {
    #[schemars(description = "Tag to match exactly")]
    pub tag: String,
    #[schemars(description = "Page number, starting at 1 (default 1)")]
    pub page: Option<u32>,
    #[schemars(description = "Todos per page, 1-100 (default 10)")]
    pub limit: Option<u32>,
}

// =============================================================================
// Result helpers
// =============================================================================

fn success(payload: Value) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(payload.to_string())]))
}

fn failure(e: ServiceError) -> Result<CallToolResult, McpError> {
    match &e {
        ServiceError::Store { .. } => error!(error = %e, "tool call failed in the store"),
        _ => warn!(error = %e, "tool call failed"),
    }
    let payload = json!({ "error": e.client_message() });
    Ok(CallToolResult::error(vec![Content::text(payload.to_string())]))
}

fn pagination_json(page: &TodoPage) -> Value {
    json!({
        "page": page.page,
        "limit": page.limit,
        "total": page.total,
        "total_pages": page.total_pages,
        "has_next": page.has_next,
        "has_prev": page.has_prev,
    })
}

fn page_json(page: TodoPage) -> Value {
    json!({
        "success": true,
        "pagination": pagination_json(&page),
        "count": page.items.len(),
        "todos": page.items,
    })
}

/// Treat an empty string as an explicit "clear this field".
fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| if v.is_empty() { None } else { Some(v) })
}

impl From<CreateTodoParams> for CreateTodo {
    fn from(p: CreateTodoParams) -> Self {
        Self {
            title: p.title,
            description: p.description,
            priority: p.priority,
            due_date: p.due_date,
            tags: p.tags,
            completed: None,
        }
    }
}

impl GetTodosParams {
    fn into_parts(self) -> Result<(TodoFilter, Pagination), ServiceError> {
        let pagination = Pagination::new(self.page, self.limit)?;
        let mut filter = TodoFilter {
            completed: self.completed,
            ..Default::default()
        };
        if let Some(priority) = self.priority.as_deref().filter(|p| !p.is_empty()) {
            filter.priority = Some(parse_priority(priority)?);
        }
        if let Some(tag) = self.tag {
            filter = filter.with_tag(tag);
        }
        if let Some(search) = self.search {
            filter = filter.with_search(search);
        }
        Ok((filter, pagination))
    }
}

/// The tool router for [`McpServer`].
pub(super) fn router<D: Database + 'static>() -> ToolRouter<McpServer<D>> {
    McpServer::<D>::tool_router()
}

// =============================================================================
// Tools
// =============================================================================

#[tool_router]
impl<D: Database + 'static> McpServer<D> {
    fn service(&self) -> &TodoService<D> {
        &self.service
    }

    #[tool(description = "Create a new todo item. Only the title is required.")]
    pub async fn create_todo(
        &self,
        Parameters(params): Parameters<CreateTodoParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.service().create(CreateTodo::from(params)).await {
            Ok(todo) => success(json!({
                "success": true,
                "message": format!("Todo '{}' created successfully", todo.title),
                "todo": todo,
            })),
            Err(e) => failure(e),
        }
    }

    #[tool(
        description = "List todos, newest first, with optional filters (completed, priority, tag, search) and pagination."
    )]
    pub async fn get_todos(
        &self,
        Parameters(params): Parameters<GetTodosParams>,
    ) -> Result<CallToolResult, McpError> {
        let (filter, pagination) = match params.into_parts() {
            Ok(parts) => parts,
            Err(e) => return failure(e),
        };
        match self.service().list(filter, pagination).await {
            Ok(page) => success(page_json(page)),
            Err(e) => failure(e),
        }
    }

    #[tool(description = "Get a single todo by its ID.")]
    pub async fn get_todo(
        &self,
        Parameters(params): Parameters<TodoIdParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.service().get(&params.todo_id).await {
            Ok(todo) => success(json!({ "success": true, "todo": todo })),
            Err(e) => failure(e),
        }
    }

    #[tool(
        description = "Update an existing todo. Only the supplied fields change; an empty description or due_date clears it."
    )]
    pub async fn update_todo(
        &self,
        Parameters(params): Parameters<UpdateTodoParams>,
    ) -> Result<CallToolResult, McpError> {
        let update = UpdateTodo {
            title: params.title,
            description: clearable(params.description),
            completed: params.completed,
            priority: params.priority,
            due_date: clearable(params.due_date),
            tags: params.tags,
        };
        match self.service().update(&params.todo_id, update).await {
            Ok(todo) => success(json!({
                "success": true,
                "message": format!("Todo '{}' updated successfully", todo.title),
                "todo": todo,
            })),
            Err(e) => failure(e),
        }
    }

    #[tool(description = "Delete a todo by its ID.")]
    pub async fn delete_todo(
        &self,
        Parameters(params): Parameters<TodoIdParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.service().delete(&params.todo_id).await {
            Ok(()) => success(json!({
                "success": true,
                "message": format!("Todo with ID '{}' deleted successfully", params.todo_id),
            })),
            Err(e) => failure(e),
        }
    }

    #[tool(description = "Toggle the completion status of a todo.")]
    pub async fn toggle_todo(
        &self,
        Parameters(params): Parameters<TodoIdParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.service().toggle(&params.todo_id).await {
            Ok(todo) => {
                let state = if todo.completed { "completed" } else { "pending" };
                success(json!({
                    "success": true,
                    "message": format!("Todo '{}' marked as {}", todo.title, state),
                    "todo": todo,
                }))
            }
            Err(e) => failure(e),
        }
    }

    #[tool(description = "List completed todos, newest first.")]
    pub async fn get_completed_todos(
        &self,
        Parameters(params): Parameters<PageParams>,
    ) -> Result<CallToolResult, McpError> {
        let pagination = match Pagination::new(params.page, params.limit) {
            Ok(p) => p,
            Err(e) => return failure(e.into()),
        };
        match self.service().list_completed(pagination).await {
            Ok(page) => success(page_json(page)),
            Err(e) => failure(e),
        }
    }

    #[tool(description = "List pending (not completed) todos, newest first.")]
    pub async fn get_pending_todos(
        &self,
        Parameters(params): Parameters<PageParams>,
    ) -> Result<CallToolResult, McpError> {
        let pagination = match Pagination::new(params.page, params.limit) {
            Ok(p) => p,
            Err(e) => return failure(e.into()),
        };
        match self.service().list_pending(pagination).await {
            Ok(page) => success(page_json(page)),
            Err(e) => failure(e),
        }
    }

    #[tool(description = "List todos carrying a specific tag, newest first.")]
    pub async fn get_todos_by_tag(
        &self,
        Parameters(params): Parameters<TagParams>,
    ) -> Result<CallToolResult, McpError> {
        let pagination = match Pagination::new(params.page, params.limit) {
            Ok(p) => p,
            Err(e) => return failure(e.into()),
        };
        match self.service().list_by_tag(&params.tag, pagination).await {
            Ok(page) => {
                let mut payload = page_json(page);
                payload["tag"] = json!(params.tag);
                success(payload)
            }
            Err(e) => failure(e),
        }
    }

    #[tool(
        description = "Get statistics: totals, completion rate (fraction 0-1) and a breakdown by priority."
    )]
    pub async fn get_todo_stats(&self) -> Result<CallToolResult, McpError> {
        match self.service().stats().await {
            Ok(stats) => success(json!({ "success": true, "stats": stats })),
            Err(e) => failure(e),
        }
    }
}
