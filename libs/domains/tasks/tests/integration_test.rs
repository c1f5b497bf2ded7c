//! Repository and service tests against a real PostgreSQL container
//!
//! Ignored by default because they need Docker:
//! `cargo test -p domain_tasks --test integration_test -- --ignored`

use domain_tasks::*;
use test_utils::assertions::{assert_not_after, assert_some};
use test_utils::{TestDataBuilder, TestDatabase};

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_and_get_round_trip() {
    let db = TestDatabase::new().await;
    let service = DefaultTaskService::new(PgTaskRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("pg_round_trip");

    let created = service
        .create_task(Task::new(
            builder.title("main"),
            builder.description("main"),
            "Pending",
        ))
        .await
        .unwrap();
    assert!(created.id > 0);

    let fetched = service.get_task(created.id).await.unwrap();
    assert_eq!(fetched.title, builder.title("main"));
    assert_eq!(fetched.description, builder.description("main"));
    assert_eq!(fetched.status, "Pending");
    assert_eq!(fetched.created_at, created.created_at);
    assert_not_after(fetched.created_at, fetched.updated_at, "fresh row");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_list_on_empty_table() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());

    assert_eq!(repo.list().await.unwrap().len(), 0);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_get_missing_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_missing");

    assert!(repo.get_by_id(builder.missing_id()).await.unwrap().is_none());

    let service = DefaultTaskService::new(repo);
    let err = service.get_task(builder.missing_id()).await.unwrap_err();
    assert!(matches!(err, TaskError::NotFound));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_refreshes_updated_at_only() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_update");

    let created = repo
        .create(Task::new(builder.title("v1"), "", "Pending"))
        .await
        .unwrap();

    let mut changed = Task::new(builder.title("v2"), "edited", "InProgress");
    changed.id = created.id;
    repo.update(changed).await.unwrap();

    let stored = assert_some(repo.get_by_id(created.id).await.unwrap(), "updated row");
    assert_eq!(stored.title, builder.title("v2"));
    assert_eq!(stored.status, "InProgress");
    assert_eq!(stored.created_at, created.created_at);
    assert_not_after(created.updated_at, stored.updated_at, "refreshed updated_at");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_delete_and_missing_writes_are_silent() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_delete");

    let created = repo
        .create(Task::new(builder.title("doomed"), "", "Completed"))
        .await
        .unwrap();

    repo.delete(created.id).await.unwrap();
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());

    // Neither call touches a row
    repo.delete(created.id).await.unwrap();
    let mut ghost = Task::new("ghost", "", "Pending");
    ghost.id = builder.missing_id();
    repo.update(ghost).await.unwrap();

    db.truncate_tasks().await;
    assert!(repo.list().await.unwrap().is_empty());
}
