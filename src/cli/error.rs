use miette::Diagnostic;
use thiserror::Error;

/// Ways a client command can fail to get an answer from the todo server.
#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("Cannot reach the todo server at {url}")]
    #[diagnostic(
        code(todo_app::cli::unreachable),
        help("Start one with `todo serve`, or point --api-url / TODO_API_URL at a running server.")
    )]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected reply from the todo server: {message}")]
    #[diagnostic(
        code(todo_app::cli::unexpected_reply),
        help("The server at --api-url may not be a todo server, or runs a different version.")
    )]
    UnexpectedReply { message: String },

    #[error("Server refused the request ({status}): {message}")]
    #[diagnostic(code(todo_app::cli::rejected))]
    Rejected {
        status: u16,
        message: String,
        #[help]
        hint: Option<String>,
    },
}

impl CliError {
    /// A non-success reply, with a hint chosen by status class.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        let hint = match status {
            400 | 422 => Some("Check the values given; `todo <command> --help` lists accepted forms."),
            404 => Some("Run `todo list` to see existing todo IDs."),
            500..=599 => Some("The server failed to handle the request; its log has the details."),
            _ => None,
        };
        CliError::Rejected {
            status,
            message: message.into(),
            hint: hint.map(str::to_string),
        }
    }
}

impl From<reqwest::Error> for CliError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            let url = e
                .url()
                .map(|u| u.origin().ascii_serialization())
                .unwrap_or_else(|| "the configured URL".to_string());
            CliError::Unreachable { url, source: e }
        } else {
            CliError::UnexpectedReply {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::UnexpectedReply {
            message: e.to_string(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
