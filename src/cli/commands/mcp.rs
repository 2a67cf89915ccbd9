//! MCP over stdio, for agents that spawn the binary as a subprocess

use miette::Result;

use crate::config::StoreConfig;
use crate::db::Database;
use crate::mcp;
use crate::service::TodoService;

use super::store::{self, Store};

/// Serve the MCP tools on stdin/stdout until the client disconnects.
///
/// Nothing but protocol frames may be written to stdout here.
pub async fn run(store_config: StoreConfig) -> Result<()> {
    match store::open(&store_config).await? {
        Store::Sqlite(db) => serve(TodoService::new(db)).await,
        Store::Memory(db) => serve(TodoService::new(db)).await,
    }
}

async fn serve<D: Database + 'static>(service: TodoService<D>) -> Result<()> {
    mcp::serve_stdio(service.clone()).await?;
    service.db().close().await;
    Ok(())
}
