//! SQLite implementation of the database traits.
//!
//! This module provides a SQLite-backed implementation of the repository
//! traits defined in the parent module. Todos are stored as rows with their
//! tags kept as a JSON array.

mod connection;
mod helpers;
mod todo;

#[cfg(test)]
mod connection_test;

pub use connection::SqliteDatabase;
pub use todo::SqliteTodoRepository;
