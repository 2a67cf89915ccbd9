//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{
    self, CreateTodoRequest, DeleteResponse, ErrorResponse, HealthResponse,
    PriorityBreakdownResponse, RootResponse, StatsResponse, TodoPageResponse, TodoResponse,
    UpdateTodoRequest,
};
use super::state::AppState;
use crate::db::Database;
use crate::mcp::create_mcp_service;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "CRUD todo service with REST and MCP access",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::create_todo,
        handlers::list_todos,
        handlers::get_todo,
        handlers::update_todo,
        handlers::delete_todo,
        handlers::toggle_todo,
        handlers::list_completed_todos,
        handlers::list_pending_todos,
        handlers::list_todos_by_tag,
        handlers::get_stats,
    ),
    components(
        schemas(
            RootResponse,
            HealthResponse,
            TodoResponse,
            TodoPageResponse,
            CreateTodoRequest,
            UpdateTodoRequest,
            DeleteResponse,
            StatsResponse,
            PriorityBreakdownResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "todos", description = "Todo management endpoints"),
        (name = "stats", description = "Aggregate statistics")
    )
)]
pub struct ApiDoc;

/// Create the application router: REST API, MCP endpoint and optional docs.
///
/// `cancellation_token` ends open MCP sessions on shutdown.
pub fn create_router<D: Database + 'static>(
    state: AppState<D>,
    enable_docs: bool,
    cancellation_token: CancellationToken,
) -> Router {
    let mcp_service = create_mcp_service(state.service().clone(), cancellation_token);

    // System routes (non-generic)
    let system_routes = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health));

    // Todo routes (generic over Database)
    let todo_routes = routes!(D => {
        post "/todos" => handlers::create_todo,
        get "/todos" => handlers::list_todos,
        get "/todos/completed" => handlers::list_completed_todos,
        get "/todos/pending" => handlers::list_pending_todos,
        get "/todos/tag/{tag}" => handlers::list_todos_by_tag,
        get "/todos/{id}" => handlers::get_todo,
        put "/todos/{id}" => handlers::update_todo,
        delete "/todos/{id}" => handlers::delete_todo,
        patch "/todos/{id}/toggle" => handlers::toggle_todo,
        get "/stats" => handlers::get_stats,
    });

    let mut router = system_routes.merge(todo_routes);

    if enable_docs {
        router = router.merge(Scalar::with_url("/docs", ApiDoc::openapi()));
    }

    router
        .with_state(state)
        .nest_service("/mcp", mcp_service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
