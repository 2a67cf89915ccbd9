//! Server command - starts REST API + MCP

use std::net::IpAddr;

use miette::Result;

use crate::api::{self, Config};
use crate::config::StoreConfig;

use super::store::{self, Store};

/// Run the API server
pub async fn run(
    host: IpAddr,
    port: u16,
    enable_docs: bool,
    store_config: StoreConfig,
) -> Result<()> {
    let store = store::open(&store_config).await?;

    println!();
    println!("🚀 todo API server starting...");
    println!("   API:      http://{}:{}/todos", host, port);
    println!("   MCP:      http://{}:{}/mcp", host, port);
    if enable_docs {
        println!("   Docs:     http://{}:{}/docs", host, port);
    }
    println!();
    println!("   Store:    {}", store_config.location());
    println!();

    let config = Config {
        host,
        port,
        enable_docs,
    };

    match store {
        Store::Sqlite(db) => api::run(config, db).await?,
        Store::Memory(db) => api::run(config, db).await?,
    }

    Ok(())
}
