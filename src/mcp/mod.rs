//! Model Context Protocol (MCP) server implementation
//!
//! Exposes the todo operations as MCP tools, plus two prompt templates, over
//! the Streamable HTTP transport (mounted at `/mcp`) or stdio.
//!
//! - **server**: `McpServer`, the `ServerHandler` coordinating tools and prompts
//! - **tools**: one tool per todo operation, each a single facade call
//! - **prompts**: static prompt templates
//! - **service**: transport wiring

mod prompts;
pub mod server;
mod service;
pub mod tools;

#[cfg(test)]
mod tools_test;

pub use server::McpServer;
pub use service::{TransportError, create_mcp_service, serve_stdio};
