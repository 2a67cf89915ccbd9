//! Tests for todo MCP tools

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, RawContent};
use serde_json::Value;

use crate::db::{Database, MemoryDatabase, SqliteDatabase};
use crate::service::TodoService;

use super::server::McpServer;
use super::tools::{
    CreateTodoParams, GetTodosParams, PageParams, TagParams, TodoIdParams, UpdateTodoParams,
};

fn server() -> McpServer<MemoryDatabase> {
    McpServer::new(TodoService::new(MemoryDatabase::new()))
}

fn payload(result: &CallToolResult) -> Value {
    let text = match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    };
    serde_json::from_str(text).unwrap()
}

fn is_error(result: &CallToolResult) -> bool {
    result.is_error == Some(true)
}

fn create_params(title: &str) -> CreateTodoParams {
    CreateTodoParams {
        title: title.to_string(),
        description: None,
        priority: None,
        due_date: None,
        tags: None,
    }
}

fn update_params(todo_id: &str) -> UpdateTodoParams {
    UpdateTodoParams {
        todo_id: todo_id.to_string(),
        title: None,
        description: None,
        completed: None,
        priority: None,
        due_date: None,
        tags: None,
    }
}

async fn create(server: &McpServer<MemoryDatabase>, params: CreateTodoParams) -> Value {
    let result = server
        .create_todo(Parameters(params))
        .await
        .expect("create_todo should succeed");
    assert!(!is_error(&result));
    payload(&result)["todo"].clone()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_todo() {
    let server = server();

    let result = server
        .create_todo(Parameters(CreateTodoParams {
            title: "Buy milk".to_string(),
            description: Some("2 liters".to_string()),
            priority: Some("high".to_string()),
            due_date: Some("2030-01-15".to_string()),
            tags: Some(vec!["shopping".to_string()]),
        }))
        .await
        .unwrap();

    assert!(!is_error(&result));
    let json = payload(&result);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Todo 'Buy milk' created successfully");
    assert_eq!(json["todo"]["priority"], "high");
    assert_eq!(json["todo"]["completed"], false);
    assert_eq!(json["todo"]["tags"][0], "shopping");
    assert!(json["todo"]["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_todo_validation_error() {
    let server = server();

    let result = server
        .create_todo(Parameters(create_params("")))
        .await
        .unwrap();
    assert!(is_error(&result));
    assert!(payload(&result)["error"].as_str().is_some());

    let mut params = create_params("Bad priority");
    params.priority = Some("urgent".to_string());
    let result = server.create_todo(Parameters(params)).await.unwrap();
    assert!(is_error(&result));

    let stats = payload(&server.get_todo_stats().await.unwrap());
    assert_eq!(stats["stats"]["total"], 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_todo_and_not_found() {
    let server = server();
    let todo = create(&server, create_params("Find me")).await;
    let id = todo["id"].as_str().unwrap().to_string();

    let result = server
        .get_todo(Parameters(TodoIdParams { todo_id: id.clone() }))
        .await
        .unwrap();
    assert!(!is_error(&result));
    assert_eq!(payload(&result)["todo"]["title"], "Find me");

    let result = server
        .get_todo(Parameters(TodoIdParams {
            todo_id: "missing".to_string(),
        }))
        .await
        .unwrap();
    assert!(is_error(&result));
    assert!(
        payload(&result)["error"]
            .as_str()
            .unwrap()
            .contains("missing")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_todos_pagination_and_filters() {
    let server = server();
    for i in 0..12 {
        let mut params = create_params(&format!("todo {}", i));
        if i % 3 == 0 {
            params.priority = Some("high".to_string());
        }
        create(&server, params).await;
    }

    let result = server
        .get_todos(Parameters(GetTodosParams {
            page: Some(2),
            limit: Some(5),
            ..Default::default()
        }))
        .await
        .unwrap();
    let json = payload(&result);
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 5);
    assert_eq!(json["pagination"]["total"], 12);
    assert_eq!(json["pagination"]["total_pages"], 3);
    assert_eq!(json["pagination"]["has_next"], true);
    assert_eq!(json["pagination"]["has_prev"], true);

    let result = server
        .get_todos(Parameters(GetTodosParams {
            priority: Some("high".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert_eq!(payload(&result)["pagination"]["total"], 4);

    let result = server
        .get_todos(Parameters(GetTodosParams {
            search: Some("TODO 1".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    // "todo 1", "todo 10", "todo 11"
    assert_eq!(payload(&result)["pagination"]["total"], 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_todos_rejects_bad_arguments() {
    let server = server();

    let result = server
        .get_todos(Parameters(GetTodosParams {
            limit: Some(101),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert!(is_error(&result));

    let result = server
        .get_todos(Parameters(GetTodosParams {
            priority: Some("urgent".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert!(is_error(&result));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_todo() {
    let server = server();
    let mut params = create_params("Draft");
    params.description = Some("first pass".to_string());
    params.due_date = Some("2030-01-15".to_string());
    let todo = create(&server, params).await;
    let id = todo["id"].as_str().unwrap();

    let mut update = update_params(id);
    update.title = Some("Final".to_string());
    update.priority = Some("low".to_string());
    let result = server.update_todo(Parameters(update)).await.unwrap();
    let json = payload(&result);
    assert_eq!(json["message"], "Todo 'Final' updated successfully");
    assert_eq!(json["todo"]["priority"], "low");
    assert_eq!(json["todo"]["description"], "first pass");

    let mut update = update_params(id);
    update.description = Some(String::new());
    update.due_date = Some(String::new());
    let result = server.update_todo(Parameters(update)).await.unwrap();
    let json = payload(&result);
    assert!(json["todo"]["description"].is_null());
    assert!(json["todo"]["due_date"].is_null());
    assert_eq!(json["todo"]["title"], "Final");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_todo_errors() {
    let server = server();

    let result = server
        .update_todo(Parameters(update_params("missing")))
        .await
        .unwrap();
    assert!(is_error(&result));

    let todo = create(&server, create_params("Keep")).await;
    let mut update = update_params(todo["id"].as_str().unwrap());
    update.title = Some("   ".to_string());
    let result = server.update_todo(Parameters(update)).await.unwrap();
    assert!(is_error(&result));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_todo() {
    let server = server();
    let todo = create(&server, create_params("Trash")).await;
    let id = todo["id"].as_str().unwrap().to_string();

    let result = server
        .delete_todo(Parameters(TodoIdParams { todo_id: id.clone() }))
        .await
        .unwrap();
    assert!(!is_error(&result));
    assert_eq!(
        payload(&result)["message"],
        format!("Todo with ID '{}' deleted successfully", id)
    );

    let result = server
        .delete_todo(Parameters(TodoIdParams { todo_id: id }))
        .await
        .unwrap();
    assert!(is_error(&result));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_toggle_todo_twice() {
    let server = server();
    let todo = create(&server, create_params("Flip")).await;
    let id = todo["id"].as_str().unwrap().to_string();

    let result = server
        .toggle_todo(Parameters(TodoIdParams { todo_id: id.clone() }))
        .await
        .unwrap();
    let json = payload(&result);
    assert_eq!(json["todo"]["completed"], true);
    assert_eq!(json["message"], "Todo 'Flip' marked as completed");

    let result = server
        .toggle_todo(Parameters(TodoIdParams { todo_id: id }))
        .await
        .unwrap();
    let json = payload(&result);
    assert_eq!(json["todo"]["completed"], false);
    assert_eq!(json["message"], "Todo 'Flip' marked as pending");

    let result = server
        .toggle_todo(Parameters(TodoIdParams {
            todo_id: "missing".to_string(),
        }))
        .await
        .unwrap();
    assert!(is_error(&result));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_completed_pending_and_tag_views() {
    let server = server();
    let mut params = create_params("Tagged");
    params.tags = Some(vec!["work".to_string(), "urgent".to_string()]);
    let tagged = create(&server, params).await;
    create(&server, create_params("Plain")).await;
    server
        .toggle_todo(Parameters(TodoIdParams {
            todo_id: tagged["id"].as_str().unwrap().to_string(),
        }))
        .await
        .unwrap();

    let completed = payload(
        &server
            .get_completed_todos(Parameters(PageParams::default()))
            .await
            .unwrap(),
    );
    assert_eq!(completed["count"], 1);
    assert_eq!(completed["todos"][0]["title"], "Tagged");

    let pending = payload(
        &server
            .get_pending_todos(Parameters(PageParams::default()))
            .await
            .unwrap(),
    );
    assert_eq!(pending["count"], 1);
    assert_eq!(pending["todos"][0]["title"], "Plain");

    let by_tag = payload(
        &server
            .get_todos_by_tag(Parameters(TagParams {
                tag: "work".to_string(),
                page: None,
                limit: None,
            }))
            .await
            .unwrap(),
    );
    assert_eq!(by_tag["tag"], "work");
    assert_eq!(by_tag["count"], 1);

    let none = payload(
        &server
            .get_todos_by_tag(Parameters(TagParams {
                tag: "wor".to_string(),
                page: None,
                limit: None,
            }))
            .await
            .unwrap(),
    );
    assert_eq!(none["count"], 0);

    let result = server
        .get_pending_todos(Parameters(PageParams {
            page: Some(0),
            limit: None,
        }))
        .await
        .unwrap();
    assert!(is_error(&result));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_todo_stats() {
    let server = server();

    let empty = payload(&server.get_todo_stats().await.unwrap());
    assert_eq!(empty["stats"]["total"], 0);
    assert_eq!(empty["stats"]["completion_rate"], 0.0);

    for (title, priority) in [("a", "high"), ("b", "low"), ("c", "medium"), ("d", "high")] {
        let mut params = create_params(title);
        params.priority = Some(priority.to_string());
        let todo = create(&server, params).await;
        if title == "a" {
            server
                .toggle_todo(Parameters(TodoIdParams {
                    todo_id: todo["id"].as_str().unwrap().to_string(),
                }))
                .await
                .unwrap();
        }
    }

    let json = payload(&server.get_todo_stats().await.unwrap());
    assert_eq!(json["success"], true);
    let stats = &json["stats"];
    assert_eq!(stats["total"], 4);
    assert_eq!(stats["completed"], 1);
    assert_eq!(stats["pending"], 3);
    assert_eq!(stats["completion_rate"], 0.25);
    assert_eq!(stats["by_priority"]["high"], 2);
    assert_eq!(stats["by_priority"]["medium"], 1);
    assert_eq!(stats["by_priority"]["low"], 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_store_failure_is_tool_error() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    db.close().await;
    let server = McpServer::new(TodoService::new(db));

    let result = server
        .get_todos(Parameters(GetTodosParams::default()))
        .await
        .unwrap();
    assert!(is_error(&result));
    assert_eq!(payload(&result)["error"], "Internal store error");

    let result = server.get_todo_stats().await.unwrap();
    assert!(is_error(&result));

    let result = server.create_todo(Parameters(create_params("Lost"))).await.unwrap();
    assert!(is_error(&result));
    assert_eq!(payload(&result)["error"], "Internal store error");
}
