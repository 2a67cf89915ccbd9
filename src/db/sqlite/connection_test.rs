//! Tests for SQLite database connection and migrations.

use crate::db::{CreateTodo, Database, NewTodo, SqliteDatabase, TodoRepository};

#[tokio::test(flavor = "multi_thread")]
async fn migrate_creates_todo_table() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.migrate().await.expect("Migration should succeed");

    let tables: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .fetch_all(db.pool())
            .await
            .expect("Query should succeed");

    for table in ["_sqlx_migrations", "todo"] {
        assert!(
            tables.iter().any(|t| t == table),
            "Missing table: {}. Found tables: {:?}",
            table,
            tables
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn migrate_is_idempotent() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.migrate().await.expect("First migration should succeed");
    db.migrate().await.expect("Second migration should succeed");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todo")
        .fetch_one(db.pool())
        .await
        .expect("Query should succeed");
    assert_eq!(count, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn file_database_persists_across_connections() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("todo_app.db");

    let id = {
        let db = SqliteDatabase::open(&path)
            .await
            .expect("Open should succeed");
        db.migrate().await.expect("Migration should succeed");
        let new = NewTodo::try_from(CreateTodo::titled("Survive a restart")).unwrap();
        let todo = db.todos().insert(&new).await.expect("Insert should succeed");
        db.close().await;
        todo.id
    };

    let db = SqliteDatabase::open(&path)
        .await
        .expect("Reopen should succeed");
    db.migrate().await.expect("Migration should succeed");
    let todo = db.todos().get(&id).await.expect("Todo should persist");
    assert_eq!(todo.title, "Survive a restart");
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_path_is_a_connection_error() {
    let result = SqliteDatabase::connect("sqlite:///nonexistent-todo-dir/nested/todo.db").await;
    assert!(matches!(
        result,
        Err(crate::db::DbError::Connection { .. })
    ));
}
