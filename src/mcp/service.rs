//! MCP transports
//!
//! Streamable HTTP (nested into the Axum router at `/mcp`) and stdio (for
//! agents that spawn `todo mcp` as a subprocess).

use miette::Diagnostic;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::db::Database;
use crate::service::TodoService;

use super::server::McpServer;

/// Errors from running the stdio transport
#[derive(Error, Diagnostic, Debug)]
pub enum TransportError {
    #[error("MCP initialization failed: {message}")]
    #[diagnostic(code(todo_app::mcp::initialize))]
    Initialize { message: String },

    #[error("MCP server task failed: {0}")]
    #[diagnostic(code(todo_app::mcp::join))]
    Join(#[from] tokio::task::JoinError),
}

/// Create MCP Streamable HTTP service
///
/// Every session gets its own [`McpServer`] sharing `service`'s store.
/// Cancelling `cancellation_token` closes all open sessions.
pub fn create_mcp_service<D: Database + 'static>(
    service: TodoService<D>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer<D>> {
    // Service factory: creates new McpServer instance per session
    // Note: Returns io::Error to match rmcp's expected signature
    let service_factory =
        move || -> Result<McpServer<D>, std::io::Error> { Ok(McpServer::new(service.clone())) };

    let config = StreamableHttpServerConfig {
        stateful_mode: true,
        cancellation_token,
        ..Default::default()
    };

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}

/// Serve MCP over stdin/stdout until the client disconnects.
pub async fn serve_stdio<D: Database + 'static>(
    service: TodoService<D>,
) -> Result<(), TransportError> {
    let running = McpServer::new(service)
        .serve(stdio())
        .await
        .map_err(|e| TransportError::Initialize {
            message: e.to_string(),
        })?;
    info!("MCP stdio server ready");

    let reason = running.waiting().await?;
    info!(?reason, "MCP stdio server stopped");
    Ok(())
}
