//! Sample todo set used by `todo seed`.

use chrono::{Duration, SecondsFormat, Utc};

use crate::db::CreateTodo;

/// Sample todos; due dates are relative to now.
pub fn sample_todos() -> Vec<CreateTodo> {
    let due_in = |days: i64| {
        Some((Utc::now() + Duration::days(days)).to_rfc3339_opts(SecondsFormat::Secs, true))
    };

    let sample = |title: &str,
                  description: &str,
                  priority: &str,
                  tags: &[&str],
                  due_date: Option<String>| CreateTodo {
        title: title.to_string(),
        description: Some(description.to_string()),
        priority: Some(priority.to_string()),
        due_date,
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        completed: None,
    };

    vec![
        sample(
            "Learn Axum",
            "Complete the Axum tutorial and build a todo app",
            "high",
            &["learning", "backend", "rust"],
            due_in(7),
        ),
        sample(
            "Setup SQLite",
            "Create the database file and run the migrations",
            "high",
            &["database", "setup"],
            due_in(1),
        ),
        sample(
            "Write API Documentation",
            "Create comprehensive API documentation",
            "medium",
            &["documentation", "api"],
            due_in(3),
        ),
        CreateTodo {
            completed: Some(true),
            ..sample(
                "Add Error Handling",
                "Implement proper error handling and validation",
                "medium",
                &["error-handling", "validation"],
                None,
            )
        },
        sample(
            "Create Unit Tests",
            "Write unit tests for all CRUD operations",
            "low",
            &["testing", "quality"],
            due_in(14),
        ),
        sample(
            "Deploy to Production",
            "Deploy the application to a production environment",
            "high",
            &["deployment", "production"],
            due_in(30),
        ),
        sample(
            "Optimize Database Queries",
            "Review and optimize the SQL queries for better performance",
            "low",
            &["optimization", "database"],
            due_in(21),
        ),
        sample(
            "Add Authentication",
            "Implement user authentication and authorization",
            "medium",
            &["security", "authentication"],
            due_in(10),
        ),
        sample(
            "Create Frontend",
            "Build a web frontend for the todo app",
            "medium",
            &["frontend", "ui"],
            due_in(21),
        ),
        sample(
            "Setup CI/CD Pipeline",
            "Configure continuous integration and deployment",
            "low",
            &["ci-cd", "devops"],
            due_in(28),
        ),
        sample(
            "Daily 10 min walk",
            "A quick 10-minute walk to stay active",
            "high",
            &["health", "exercise"],
            due_in(1),
        ),
    ]
}
