//! Opening the configured store for the server-side commands

use miette::{IntoDiagnostic, Result};
use tracing::info;

use crate::config::{StoreConfig, StoreLocation};
use crate::db::{Database, MemoryDatabase, SqliteDatabase};

/// An opened and migrated store.
pub enum Store {
    Sqlite(SqliteDatabase),
    Memory(MemoryDatabase),
}

/// Open the store `config` points at and bring its schema up to date.
pub async fn open(config: &StoreConfig) -> Result<Store> {
    open_location(config.location()).await
}

/// File stores get their parent directory created first.
pub async fn open_location(location: StoreLocation) -> Result<Store> {
    info!(%location, "opening store");

    let store = match location {
        StoreLocation::Memory => Store::Memory(MemoryDatabase::new()),
        StoreLocation::Url(url) => Store::Sqlite(SqliteDatabase::connect(&url).await?),
        StoreLocation::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).into_diagnostic()?;
            }
            Store::Sqlite(SqliteDatabase::open(&path).await?)
        }
    };

    match &store {
        Store::Sqlite(db) => db.migrate().await?,
        Store::Memory(db) => db.migrate().await?,
    }
    info!("store migrations complete");

    Ok(store)
}
