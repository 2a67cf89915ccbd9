//! Todo management handlers.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::db::{CreateTodo, Database, Pagination, Todo, TodoFilter, UpdateTodo, parse_priority};
use crate::service::TodoPage;

use super::{ErrorResponse, HandlerError, bad_request, service_error};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct TodoResponse {
    #[schema(example = "4f1c2a9b7d3e")]
    pub id: String,
    #[schema(example = "Buy milk")]
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    #[schema(example = "medium")]
    pub priority: String,
    pub due_date: Option<DateTime<Utc>>,
    #[schema(example = json!(["shopping", "home"]))]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            completed: t.completed,
            priority: t.priority.to_string(),
            due_date: t.due_date,
            tags: t.tags,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TodoPageResponse {
    pub items: Vec<TodoResponse>,
    pub total: usize,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub limit: u32,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<TodoPage> for TodoPageResponse {
    fn from(p: TodoPage) -> Self {
        Self {
            items: p.items.into_iter().map(TodoResponse::from).collect(),
            total: p.total,
            page: p.page,
            limit: p.limit,
            total_pages: p.total_pages,
            has_next: p.has_next,
            has_prev: p.has_prev,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTodoRequest {
    #[schema(example = "Buy milk")]
    pub title: String,
    #[schema(example = "Two litres, semi-skimmed")]
    pub description: Option<String>,
    /// low, medium or high (default medium)
    #[schema(example = "high")]
    pub priority: Option<String>,
    /// RFC 3339 timestamp or YYYY-MM-DD
    #[schema(example = "2025-06-01")]
    pub due_date: Option<String>,
    #[schema(example = json!(["shopping"]))]
    pub tags: Option<Vec<String>>,
    pub completed: Option<bool>,
}

impl From<CreateTodoRequest> for CreateTodo {
    fn from(req: CreateTodoRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            priority: req.priority,
            due_date: req.due_date,
            tags: req.tags,
            completed: req.completed,
        }
    }
}

/// Partial update; omitted fields are left unchanged, `null` clears
/// `description` and `due_date`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTodoRequest {
    #[schema(example = "Buy oat milk")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_utils::double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    #[schema(example = "low")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_utils::double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub due_date: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

impl From<UpdateTodoRequest> for UpdateTodo {
    fn from(req: UpdateTodoRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            completed: req.completed,
            priority: req.priority,
            due_date: req.due_date,
            tags: req.tags,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "Todo deleted successfully")]
    pub message: String,
    #[schema(example = "4f1c2a9b7d3e")]
    pub id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTodosQuery {
    /// Page number, starting at 1
    #[param(example = 1)]
    pub page: Option<u32>,
    /// Items per page (1-100)
    #[param(example = 10)]
    pub limit: Option<u32>,
    /// Filter by completion status
    pub completed: Option<bool>,
    /// Filter by priority (low, medium, high)
    #[param(example = "high")]
    pub priority: Option<String>,
    /// Filter by tag membership
    #[param(example = "work")]
    pub tag: Option<String>,
    /// Case-insensitive search in title and description
    #[param(example = "milk")]
    pub search: Option<String>,
}

impl ListTodosQuery {
    fn into_parts(self) -> Result<(TodoFilter, Pagination), HandlerError> {
        let pagination = Pagination::new(self.page, self.limit)
            .map_err(|e| bad_request(e.to_string()))?;

        let mut filter = TodoFilter {
            completed: self.completed,
            ..Default::default()
        };
        if let Some(priority) = self.priority.as_deref().filter(|p| !p.is_empty()) {
            filter.priority = Some(parse_priority(priority).map_err(|e| bad_request(e.to_string()))?);
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

#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number, starting at 1
    #[param(example = 1)]
    pub page: Option<u32>,
    /// Items per page (1-100)
    #[param(example = 10)]
    pub limit: Option<u32>,
}

impl PageQuery {
    fn pagination(&self) -> Result<Pagination, HandlerError> {
        Pagination::new(self.page, self.limit).map_err(|e| bad_request(e.to_string()))
    }
}

fn query_rejection(e: QueryRejection) -> HandlerError {
    bad_request(e.body_text())
}

fn json_rejection(e: JsonRejection) -> HandlerError {
    bad_request(e.body_text())
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Todo created", body = TodoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_todo<D: Database>(
    State(state): State<AppState<D>>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoResponse>), HandlerError> {
    let Json(req) = payload.map_err(json_rejection)?;

    let todo = state
        .service()
        .create(CreateTodo::from(req))
        .await
        .map_err(service_error)?;

    Ok((StatusCode::CREATED, Json(TodoResponse::from(todo))))
}

#[utoipa::path(
    get,
    path = "/todos",
    tag = "todos",
    params(ListTodosQuery),
    responses(
        (status = 200, description = "Paginated list of todos", body = TodoPageResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_todos<D: Database>(
    State(state): State<AppState<D>>,
    query: Result<Query<ListTodosQuery>, QueryRejection>,
) -> Result<Json<TodoPageResponse>, HandlerError> {
    let Query(query) = query.map_err(query_rejection)?;
    let (filter, pagination) = query.into_parts()?;

    let page = state
        .service()
        .list(filter, pagination)
        .await
        .map_err(service_error)?;

    Ok(Json(TodoPageResponse::from(page)))
}

#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Todo found", body = TodoResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_todo<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>, HandlerError> {
    let todo = state.service().get(&id).await.map_err(service_error)?;
    Ok(Json(TodoResponse::from(todo)))
}

#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Todo updated", body = TodoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn update_todo<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<TodoResponse>, HandlerError> {
    let Json(req) = payload.map_err(json_rejection)?;

    let todo = state
        .service()
        .update(&id, UpdateTodo::from(req))
        .await
        .map_err(service_error)?;

    Ok(Json(TodoResponse::from(todo)))
}

#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Todo deleted", body = DeleteResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_todo<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, HandlerError> {
    state.service().delete(&id).await.map_err(service_error)?;

    Ok(Json(DeleteResponse {
        message: "Todo deleted successfully".to_string(),
        id,
    }))
}

/// Toggle completion status
///
/// Flips `completed` and refreshes `updated_at`; nothing else changes.
#[utoipa::path(
    patch,
    path = "/todos/{id}/toggle",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Todo toggled", body = TodoResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn toggle_todo<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>, HandlerError> {
    let todo = state.service().toggle(&id).await.map_err(service_error)?;
    Ok(Json(TodoResponse::from(todo)))
}

#[utoipa::path(
    get,
    path = "/todos/completed",
    tag = "todos",
    params(PageQuery),
    responses(
        (status = 200, description = "Completed todos", body = TodoPageResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_completed_todos<D: Database>(
    State(state): State<AppState<D>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<TodoPageResponse>, HandlerError> {
    let Query(query) = query.map_err(query_rejection)?;

    let page = state
        .service()
        .list_completed(query.pagination()?)
        .await
        .map_err(service_error)?;

    Ok(Json(TodoPageResponse::from(page)))
}

#[utoipa::path(
    get,
    path = "/todos/pending",
    tag = "todos",
    params(PageQuery),
    responses(
        (status = 200, description = "Pending todos", body = TodoPageResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_pending_todos<D: Database>(
    State(state): State<AppState<D>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<TodoPageResponse>, HandlerError> {
    let Query(query) = query.map_err(query_rejection)?;

    let page = state
        .service()
        .list_pending(query.pagination()?)
        .await
        .map_err(service_error)?;

    Ok(Json(TodoPageResponse::from(page)))
}

#[utoipa::path(
    get,
    path = "/todos/tag/{tag}",
    tag = "todos",
    params(
        ("tag" = String, Path, description = "Tag to match"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Todos carrying the tag", body = TodoPageResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_todos_by_tag<D: Database>(
    State(state): State<AppState<D>>,
    Path(tag): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<TodoPageResponse>, HandlerError> {
    let Query(query) = query.map_err(query_rejection)?;

    let page = state
        .service()
        .list_by_tag(&tag, query.pagination()?)
        .await
        .map_err(service_error)?;

    Ok(Json(TodoPageResponse::from(page)))
}
