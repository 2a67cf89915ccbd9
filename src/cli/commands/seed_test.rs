use crate::cli::commands::seed::{run, seed};
use crate::config::StoreConfig;
use crate::db::{MemoryDatabase, Pagination, TodoFilter};
use crate::service::{TodoService, sample_todos};

#[tokio::test(flavor = "multi_thread")]
async fn test_seed_inserts_every_sample() {
    let service = TodoService::new(MemoryDatabase::new());

    let created = seed(service.clone()).await.expect("seed should succeed");

    assert_eq!(created, sample_todos().len());
    let stats = service.stats().await.unwrap();
    assert_eq!(stats.total, created);
    assert_eq!(stats.completed, 1);

    let page = service
        .list(TodoFilter::default(), Pagination::default())
        .await
        .unwrap();
    assert_eq!(page.total, created);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_seed_command_reports_location() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("seeded.db");
    let config =
        StoreConfig::default().with_database_url(Some(format!("sqlite://{}", path.display())));

    let output = run(config).await.expect("seed should succeed");

    assert_eq!(
        output,
        format!(
            "✓ Seeded {} todos into sqlite://{}",
            sample_todos().len(),
            path.display()
        )
    );
    assert!(path.exists());
}
