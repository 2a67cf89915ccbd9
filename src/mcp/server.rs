//! MCP server implementation
//!
//! The server routes tool and prompt requests to the handlers in
//! [`tools`](super::tools) and [`prompts`](super::prompts).

use rmcp::{
    RoleServer, ServerHandler,
    handler::server::router::{prompt::PromptRouter, tool::ToolRouter},
    model::{
        GetPromptRequestParams, GetPromptResult, ListPromptsResult, PaginatedRequestParams,
        ServerCapabilities, ServerInfo,
    },
    prompt_handler,
    service::RequestContext,
    tool_handler,
};

use crate::db::Database;
use crate::service::TodoService;

use super::{prompts, tools};

/// Todo MCP server.
///
/// Generic over `D: Database` for zero-cost abstraction (no dynamic dispatch).
/// One instance is created per MCP session; they all share the same store.
pub struct McpServer<D: Database> {
    pub(super) service: TodoService<D>,
    tool_router: ToolRouter<Self>,
    prompt_router: PromptRouter<Self>,
}

impl<D: Database + 'static> Clone for McpServer<D> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            tool_router: self.tool_router.clone(),
            prompt_router: self.prompt_router.clone(),
        }
    }
}

impl<D: Database + 'static> McpServer<D> {
    pub fn new(service: TodoService<D>) -> Self {
        Self {
            service,
            tool_router: tools::router(),
            prompt_router: prompts::router(),
        }
    }
}

#[tool_handler]
#[prompt_handler]
impl<D: Database + 'static> ServerHandler for McpServer<D> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            instructions: Some(
                "Todo MCP Server - create, list, search, update, toggle and delete todos, and read statistics"
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
