//! Static prompt templates.

use rmcp::{
    ErrorData as McpError,
    handler::server::router::prompt::PromptRouter,
    model::{GetPromptResult, PromptMessage, PromptMessageRole},
    prompt, prompt_router,
};

use crate::db::Database;

use super::server::McpServer;

const CREATE_TODO_PROMPT: &str = "Create a new todo item. You can specify:
- title (required): The main task or item
- description (optional): More details about the task
- priority (optional): low, medium, or high (defaults to medium)
- due_date (optional): When it needs to be done (YYYY-MM-DD format)
- tags (optional): Categories or labels for organization

Example: \"Create a todo to 'Review project proposal' with high priority, due tomorrow, tagged with 'work' and 'urgent'\"";

const MANAGE_TODOS_PROMPT: &str = "Manage your todos. You can:
- View all todos or filter by completion status, priority, tag, or search terms
- Get specific todos by ID
- Update existing todos (change title, description, priority, due date, tags, or completion status)
- Delete todos you no longer need
- Toggle completion status
- View completed or pending todos
- Find todos by tags
- Get statistics about your todo list

Example: \"Show me all high priority pending todos\" or \"Mark todo with ID 'xyz' as completed\"";

/// The prompt router for [`McpServer`].
pub(super) fn router<D: Database + 'static>() -> PromptRouter<McpServer<D>> {
    McpServer::<D>::prompt_router()
}

#[prompt_router]
impl<D: Database + 'static> McpServer<D> {
    /// Guide for creating a new todo
    #[prompt(name = "create_todo_prompt")]
    async fn create_todo_prompt(&self) -> Result<GetPromptResult, McpError> {
        Ok(GetPromptResult {
            description: Some("Prompt template for creating a new todo".to_string()),
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                CREATE_TODO_PROMPT,
            )],
        })
    }

    /// Overview of the available todo operations
    #[prompt(name = "manage_todos_prompt")]
    async fn manage_todos_prompt(&self) -> Result<GetPromptResult, McpError> {
        Ok(GetPromptResult {
            description: Some("Prompt template for managing todos".to_string()),
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                MANAGE_TODOS_PROMPT,
            )],
        })
    }
}
