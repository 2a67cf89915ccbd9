use serde::Serialize;
use tabled::{Table, Tabled, builder::Builder};

use crate::cli::api_client::ApiClient;
use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, format_tags, parse_tags, truncate_with_ellipsis};
use crate::db::Todo;
use crate::service::TodoPage;

#[derive(Debug, Serialize)]
pub(crate) struct CreateTodoRequest {
    pub(crate) title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tags: Option<Vec<String>>,
}

#[derive(Debug, Default, Serialize)]
pub(crate) struct UpdateTodoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) due_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tags: Option<Vec<String>>,
}

#[derive(Tabled)]
pub(crate) struct TodoDisplay {
    #[tabled(rename = "ID")]
    pub(crate) id: String,
    #[tabled(rename = "Title")]
    pub(crate) title: String,
    #[tabled(rename = "Done")]
    pub(crate) done: String,
    #[tabled(rename = "Priority")]
    pub(crate) priority: String,
    #[tabled(rename = "Due")]
    pub(crate) due: String,
    #[tabled(rename = "Tags")]
    pub(crate) tags: String,
}

impl From<&Todo> for TodoDisplay {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.clone(),
            title: truncate_with_ellipsis(&todo.title, 50),
            done: if todo.completed { "✓" } else { "" }.to_string(),
            priority: todo.priority.to_string(),
            due: todo
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            tags: truncate_with_ellipsis(&format_tags(&todo.tags), 30),
        }
    }
}

/// Filter parameters for listing todos
#[derive(Debug, Default)]
pub struct ListTodosFilter<'a> {
    pub completed: Option<bool>,
    pub priority: Option<&'a str>,
    pub tag: Option<&'a str>,
    pub search: Option<&'a str>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Empty input means "clear the field"
fn clearable(value: Option<&str>) -> Option<Option<String>> {
    value.map(|v| {
        if v.is_empty() {
            None
        } else {
            Some(v.to_string())
        }
    })
}

/// List todos with optional filtering and pagination
pub async fn list_todos(
    api_client: &ApiClient,
    filter: ListTodosFilter<'_>,
    format: &str,
) -> CliResult<String> {
    let mut request = api_client.get("/todos");

    if let Some(c) = filter.completed {
        request = request.query(&[("completed", c.to_string())]);
    }
    if let Some(p) = filter.priority {
        request = request.query(&[("priority", p)]);
    }
    if let Some(t) = filter.tag {
        request = request.query(&[("tag", t)]);
    }
    if let Some(s) = filter.search {
        request = request.query(&[("search", s)]);
    }
    if let Some(p) = filter.page {
        request = request.query(&[("page", p.to_string())]);
    }
    if let Some(l) = filter.limit {
        request = request.query(&[("limit", l.to_string())]);
    }

    let response = request.send().await?;
    let page: TodoPage = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&page)?),
        _ => Ok(format_page(&page)),
    }
}

pub(crate) fn format_table(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return "No todos found.".to_string();
    }

    let display_todos: Vec<TodoDisplay> = todos.iter().map(|t| t.into()).collect();
    let mut table = Table::new(display_todos);
    apply_table_style(&mut table);
    table.to_string()
}

pub(crate) fn format_page(page: &TodoPage) -> String {
    if page.items.is_empty() {
        return format_table(&page.items);
    }
    format!(
        "{}\nPage {} of {} ({} todos)",
        format_table(&page.items),
        page.page,
        page.total_pages,
        page.total
    )
}

/// Get a single todo by ID
pub async fn get_todo(api_client: &ApiClient, id: &str, format: &str) -> CliResult<String> {
    let response = api_client.get(&format!("/todos/{}", id)).send().await?;
    let todo: Todo = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&todo)?),
        _ => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            builder.push_record(["ID", &todo.id]);
            builder.push_record(["Title", &todo.title]);
            if let Some(desc) = &todo.description {
                builder.push_record(["Description", desc]);
            }
            builder.push_record(["Completed", if todo.completed { "yes" } else { "no" }]);
            builder.push_record(["Priority", todo.priority.as_str()]);
            builder.push_record([
                "Due",
                &todo
                    .due_date
                    .map(|d| d.to_rfc3339())
                    .unwrap_or_else(|| "-".to_string()),
            ]);
            builder.push_record(["Tags", &format_tags(&todo.tags)]);
            builder.push_record(["Created", &todo.created_at.to_rfc3339()]);
            builder.push_record(["Updated", &todo.updated_at.to_rfc3339()]);

            let mut table = builder.build();
            apply_table_style(&mut table);
            Ok(table.to_string())
        }
    }
}

/// Create a new todo
pub async fn create_todo(
    api_client: &ApiClient,
    title: &str,
    description: Option<&str>,
    priority: Option<&str>,
    due_date: Option<&str>,
    tags: Option<&str>,
) -> CliResult<String> {
    let request_body = CreateTodoRequest {
        title: title.to_string(),
        description: description.map(|s| s.to_string()),
        priority: priority.map(|s| s.to_string()),
        due_date: due_date.map(|s| s.to_string()),
        tags: parse_tags(tags),
    };

    let response = api_client.post("/todos").json(&request_body).send().await?;
    let todo: Todo = ApiClient::handle_response(response).await?;

    Ok(format!("✓ Created todo: {} ({})", todo.title, todo.id))
}

/// Fields to change on an existing todo; `None` leaves a field untouched
#[derive(Debug, Default)]
pub struct EditTodo<'a> {
    pub title: Option<&'a str>,
    /// Empty string clears the description
    pub description: Option<&'a str>,
    pub priority: Option<&'a str>,
    /// Empty string clears the due date
    pub due_date: Option<&'a str>,
    /// Comma-separated; empty string removes all tags
    pub tags: Option<&'a str>,
}

/// Update an existing todo
pub async fn update_todo(api_client: &ApiClient, id: &str, edit: EditTodo<'_>) -> CliResult<String> {
    let request_body = UpdateTodoRequest {
        title: edit.title.map(|s| s.to_string()),
        description: clearable(edit.description),
        priority: edit.priority.map(|s| s.to_string()),
        due_date: clearable(edit.due_date),
        tags: parse_tags(edit.tags),
    };

    let response = api_client
        .put(&format!("/todos/{}", id))
        .json(&request_body)
        .send()
        .await?;
    let todo: Todo = ApiClient::handle_response(response).await?;

    Ok(format!("✓ Updated todo: {} ({})", todo.title, todo.id))
}

/// Flip a todo between completed and pending
pub async fn toggle_todo(api_client: &ApiClient, id: &str) -> CliResult<String> {
    let response = api_client
        .patch(&format!("/todos/{}/toggle", id))
        .send()
        .await?;
    let todo: Todo = ApiClient::handle_response(response).await?;

    let state = if todo.completed { "completed" } else { "pending" };
    Ok(format!("✓ Todo {} marked as {}", todo.id, state))
}

/// Delete a todo
pub async fn delete_todo(api_client: &ApiClient, id: &str) -> CliResult<String> {
    let response = api_client.delete(&format!("/todos/{}", id)).send().await?;
    let _: serde_json::Value = ApiClient::handle_response(response).await?;

    Ok(format!("✓ Deleted todo {}", id))
}
