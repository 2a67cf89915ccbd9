//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for data access,
//! allowing different storage backends (SQLite, in-memory) to be swapped
//! without changing business logic.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: The Todo entity and aggregate types
//! - `validation`: Create/update input shapes and their checks
//! - `query`: Filter predicates and pagination
//! - `repository`: Trait definitions for data access
//! - `sqlite`, `memory`: Backends

mod error;
pub mod memory;
mod models;
mod query;
mod repository;
pub mod sqlite;
pub mod utils;
mod validation;


pub use error::{DbError, DbResult};
pub use memory::MemoryDatabase;
pub use models::*;
pub use query::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
pub use validation::*;
