//! Seed command - fills the store with the sample todo set

use miette::Result;
use tracing::info;

use crate::config::StoreConfig;
use crate::db::Database;
use crate::service::{TodoService, sample_todos};

use super::store::{self, Store};

/// Insert every sample todo and report how many were created.
pub async fn run(store_config: StoreConfig) -> Result<String> {
    let location = store_config.location();
    let created = match store::open(&store_config).await? {
        Store::Sqlite(db) => seed(TodoService::new(db)).await?,
        Store::Memory(db) => seed(TodoService::new(db)).await?,
    };

    Ok(format!("✓ Seeded {} todos into {}", created, location))
}

pub(crate) async fn seed<D: Database>(service: TodoService<D>) -> Result<usize> {
    let mut created = 0;
    for input in sample_todos() {
        let todo = service.create(input).await?;
        info!(id = %todo.id, title = %todo.title, "seeded todo");
        created += 1;
    }
    service.db().close().await;
    Ok(created)
}
