//! Store configuration.
//!
//! Resolves where todos live from CLI flags, environment variables and
//! XDG-compliant defaults, in that order of precedence.

use std::env;
use std::path::PathBuf;

pub const DATABASE_URL_ENV: &str = "TODO_DATABASE_URL";
pub const DATABASE_NAME_ENV: &str = "TODO_DATABASE_NAME";
pub const DEFAULT_DATABASE_NAME: &str = "todo_app";

const DATA_DIR_NAME: &str = "todo-app";

/// Get XDG-compliant data directory for the todo store.
///
/// Path: `$XDG_DATA_HOME/todo-app/`, falling back to `~/.local/share/todo-app/`
/// and finally to the current directory when neither variable is set.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|home| PathBuf::from(home).join(".local/share")))
        .unwrap_or_else(|_| PathBuf::from("."));

    data_home.join(DATA_DIR_NAME)
}

/// Where the store should be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Throwaway in-process store.
    Memory,
    /// Explicit sqlx SQLite connection URL.
    Url(String),
    /// SQLite database file.
    File(PathBuf),
}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_url: Option<String>,
    pub database_name: String,
    pub in_memory: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            in_memory: false,
        }
    }
}

impl StoreConfig {
    /// Configuration from `TODO_DATABASE_URL` / `TODO_DATABASE_NAME`.
    pub fn from_env() -> Self {
        Self {
            database_url: env::var(DATABASE_URL_ENV).ok().filter(|v| !v.is_empty()),
            database_name: env::var(DATABASE_NAME_ENV)
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            in_memory: false,
        }
    }

    /// Override the connection URL (CLI flag). `None` keeps the current value.
    pub fn with_database_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.database_url = Some(url);
        }
        self
    }

    /// Override the database name (CLI flag). `None` keeps the current value.
    pub fn with_database_name(mut self, name: Option<String>) -> Self {
        if let Some(name) = name {
            self.database_name = name;
        }
        self
    }

    pub fn with_in_memory(mut self, in_memory: bool) -> Self {
        self.in_memory = in_memory;
        self
    }

    /// Default database file for the configured name.
    pub fn default_db_path(&self) -> PathBuf {
        get_data_dir().join(format!("{}.db", self.database_name))
    }

    /// Resolve the effective location. `in_memory` wins, then an explicit URL.
    pub fn location(&self) -> StoreLocation {
        if self.in_memory {
            StoreLocation::Memory
        } else if let Some(url) = &self.database_url {
            StoreLocation::Url(url.clone())
        } else {
            StoreLocation::File(self.default_db_path())
        }
    }
}

impl std::fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreLocation::Memory => write!(f, "in-memory"),
            StoreLocation::Url(url) => write!(f, "{}", url),
            StoreLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}
