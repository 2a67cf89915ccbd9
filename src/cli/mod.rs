pub mod api_client;
mod commands;
pub mod error;
mod utils;


use std::net::IpAddr;

use clap::{Args, Parser, Subcommand};
use miette::Result;

use crate::api::{self, DEFAULT_PORT};
use crate::config::{DATABASE_NAME_ENV, DATABASE_URL_ENV, StoreConfig};
use commands::todo::{EditTodo, ListTodosFilter};
use error::CliResult;

#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about = "Todo service with REST and MCP interfaces", long_about = None)]
pub struct Cli {
    /// Override the API URL for client commands (default: TODO_API_URL env or http://localhost:8000)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where the server-side commands keep their todos
#[derive(Args, Debug)]
struct StoreArgs {
    /// SQLite connection URL, e.g. sqlite:///var/lib/todo/todo_app.db
    #[arg(long, env = DATABASE_URL_ENV)]
    database_url: Option<String>,

    /// Database name, used for the default file in the XDG data directory
    #[arg(long, env = DATABASE_NAME_ENV)]
    database_name: Option<String>,
}

impl StoreArgs {
    fn into_config(self, in_memory: bool) -> StoreConfig {
        StoreConfig::from_env()
            .with_database_url(self.database_url)
            .with_database_name(self.database_name)
            .with_in_memory(in_memory)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API and MCP server
    Serve {
        /// Host address to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
        #[command(flatten)]
        store: StoreArgs,
        /// Keep todos in memory only; everything is lost on exit
        #[arg(long)]
        in_memory: bool,
        /// Serve interactive API docs at /docs
        #[arg(long)]
        docs: bool,
    },
    /// Serve the MCP tools over stdin/stdout
    Mcp {
        #[command(flatten)]
        store: StoreArgs,
        /// Keep todos in memory only; everything is lost on exit
        #[arg(long)]
        in_memory: bool,
    },
    /// Insert the sample todo set
    Seed {
        #[command(flatten)]
        store: StoreArgs,
    },
    /// List todos
    List {
        /// Only completed todos
        #[arg(long, conflicts_with = "pending")]
        completed: bool,
        /// Only pending todos
        #[arg(long)]
        pending: bool,
        /// Filter by priority (low, medium, high)
        #[arg(long)]
        priority: Option<String>,
        /// Filter by tag
        #[arg(long)]
        tag: Option<String>,
        /// Search title and description
        #[arg(long)]
        search: Option<String>,
        /// Page number, starting at 1
        #[arg(long)]
        page: Option<u32>,
        /// Todos per page (1-100)
        #[arg(long)]
        limit: Option<u32>,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Create a todo
    Add {
        /// Todo title
        title: String,
        /// Longer description
        #[arg(short, long)]
        description: Option<String>,
        /// Priority (low, medium, high)
        #[arg(short, long)]
        priority: Option<String>,
        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,
        /// Tags (comma-separated)
        #[arg(long)]
        tags: Option<String>,
    },
    /// Show a single todo
    Show {
        /// Todo ID
        id: String,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Change fields of a todo
    Edit {
        /// Todo ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description (empty string clears it)
        #[arg(short, long)]
        description: Option<String>,
        /// New priority (low, medium, high)
        #[arg(short, long)]
        priority: Option<String>,
        /// New due date (empty string clears it)
        #[arg(long)]
        due: Option<String>,
        /// Replacement tags, comma-separated (empty string removes all)
        #[arg(long)]
        tags: Option<String>,
    },
    /// Flip a todo between completed and pending
    Toggle {
        /// Todo ID
        id: String,
    },
    /// Delete a todo
    Rm {
        /// Todo ID
        id: String,
    },
    /// Show statistics
    Stats {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

fn print_output(result: CliResult<String>) -> Result<()> {
    let output = result?;
    println!("{}", output);
    Ok(())
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // Show help when no command provided
        let _ = Cli::parse_from(["todo", "--help"]);
        return Ok(());
    };

    let api_client = || api_client::ApiClient::new(cli.api_url.clone());

    match command {
        Commands::Serve {
            host,
            port,
            store,
            in_memory,
            docs,
        } => {
            api::init_tracing();
            commands::serve::run(host, port, docs, store.into_config(in_memory)).await
        }
        Commands::Mcp { store, in_memory } => {
            api::init_tracing();
            commands::mcp::run(store.into_config(in_memory)).await
        }
        Commands::Seed { store } => {
            api::init_tracing();
            let output = commands::seed::run(store.into_config(false)).await?;
            println!("{}", output);
            Ok(())
        }
        Commands::List {
            completed,
            pending,
            priority,
            tag,
            search,
            page,
            limit,
            format,
        } => {
            let filter = ListTodosFilter {
                completed: match (completed, pending) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
                priority: priority.as_deref(),
                tag: tag.as_deref(),
                search: search.as_deref(),
                page,
                limit,
            };
            print_output(commands::todo::list_todos(&api_client(), filter, &format).await)
        }
        Commands::Add {
            title,
            description,
            priority,
            due,
            tags,
        } => print_output(
            commands::todo::create_todo(
                &api_client(),
                &title,
                description.as_deref(),
                priority.as_deref(),
                due.as_deref(),
                tags.as_deref(),
            )
            .await,
        ),
        Commands::Show { id, format } => {
            print_output(commands::todo::get_todo(&api_client(), &id, &format).await)
        }
        Commands::Edit {
            id,
            title,
            description,
            priority,
            due,
            tags,
        } => {
            let edit = EditTodo {
                title: title.as_deref(),
                description: description.as_deref(),
                priority: priority.as_deref(),
                due_date: due.as_deref(),
                tags: tags.as_deref(),
            };
            print_output(commands::todo::update_todo(&api_client(), &id, edit).await)
        }
        Commands::Toggle { id } => {
            print_output(commands::todo::toggle_todo(&api_client(), &id).await)
        }
        Commands::Rm { id } => print_output(commands::todo::delete_todo(&api_client(), &id).await),
        Commands::Stats { format } => {
            print_output(commands::stats::show_stats(&api_client(), &format).await)
        }
    }
}
