//! Integration tests for the task store.
//!
//! These tests exercise the real schema initialization and CRUD path
//! against a SQLite-backed pool in a temporary directory, through the same
//! `Any`-driver code the MySQL production path uses.

use taskboard::db::{Database, schema};
use taskboard::types::{TaskStatus, validate_title};
use tempfile::TempDir;

/// Helper to create a fresh file-backed database for testing.
/// The TempDir must stay alive for the duration of the test.
async fn setup_db() -> (TempDir, Database) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let url = format!("sqlite://{}/tasks.db?mode=rwc", dir.path().display());
    let db = Database::connect(&url)
        .await
        .expect("Failed to open test database");
    schema::ensure_tasks_table(&db)
        .await
        .expect("Failed to initialize schema");
    (dir, db)
}

mod schema_tests {
    use super::*;

    #[tokio::test]
    async fn schema_init_is_idempotent() {
        let (_dir, db) = setup_db().await;

        // Running again against the initialized store must succeed.
        schema::ensure_tasks_table(&db)
            .await
            .expect("Second schema init failed");

        // And the table must still be usable.
        let task = db.create_task("After re-init", None).await.unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
    }
}

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn create_then_list_contains_the_new_task() {
        let (_dir, db) = setup_db().await;

        let before = db.list_tasks().await.unwrap().len();
        let created = db.create_task("Buy milk", Some("2%")).await.unwrap();
        let tasks = db.list_tasks().await.unwrap();

        assert_eq!(tasks.len(), before + 1);
        let found = tasks.iter().find(|t| t.id == created.id).unwrap();
        assert_eq!(found.title, "Buy milk");
        assert_eq!(found.description.as_deref(), Some("2%"));
        assert_eq!(found.status, TaskStatus::Pending);
        assert_eq!(found.created_at, created.created_at);
    }

    #[tokio::test]
    async fn create_without_description() {
        let (_dir, db) = setup_db().await;

        let created = db.create_task("No details", None).await.unwrap();
        let tasks = db.list_tasks().await.unwrap();
        assert_eq!(tasks[0].id, created.id);
        assert_eq!(tasks[0].description, None);
    }

    #[tokio::test]
    async fn ids_are_unique_and_monotonic() {
        let (_dir, db) = setup_db().await;

        let a = db.create_task("first", None).await.unwrap();
        let b = db.create_task("second", None).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn rejected_title_never_reaches_the_store() {
        let (_dir, db) = setup_db().await;

        // The calling layer validates before any write; an empty title
        // fails there and the row count stays unchanged.
        assert!(validate_title("").is_err());
        assert!(db.list_tasks().await.unwrap().is_empty());
    }
}

mod list_tests {
    use super::*;

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let (_dir, db) = setup_db().await;
        assert!(db.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn tasks_ordered_newest_first() {
        let (_dir, db) = setup_db().await;

        let a = db.create_task("task A", None).await.unwrap();
        let b = db.create_task("task B", None).await.unwrap();

        let tasks = db.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, b.id);
        assert_eq!(tasks[1].id, a.id);
    }
}

mod complete_tests {
    use super::*;

    #[tokio::test]
    async fn completes_a_pending_task_and_leaves_other_fields_alone() {
        let (_dir, db) = setup_db().await;

        let created = db.create_task("Buy milk", Some("2%")).await.unwrap();
        let affected = db.complete_task(created.id).await.unwrap();
        assert_eq!(affected, 1);

        let tasks = db.list_tasks().await.unwrap();
        let task = tasks.iter().find(|t| t.id == created.id).unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.title, created.title);
        assert_eq!(task.description, created.description);
        assert_eq!(task.created_at, created.created_at);
    }

    #[tokio::test]
    async fn completing_twice_is_idempotent() {
        let (_dir, db) = setup_db().await;

        let created = db.create_task("repeat", None).await.unwrap();
        db.complete_task(created.id).await.unwrap();
        db.complete_task(created.id).await.unwrap();

        let tasks = db.list_tasks().await.unwrap();
        assert_eq!(tasks[0].status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn unknown_id_is_a_silent_noop() {
        let (_dir, db) = setup_db().await;

        let created = db.create_task("keep me", None).await.unwrap();
        let affected = db.complete_task(created.id + 999).await.unwrap();
        assert_eq!(affected, 0);

        let tasks = db.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].status, TaskStatus::Pending);
    }
}

mod delete_tests {
    use super::*;

    #[tokio::test]
    async fn deletes_exactly_one_row() {
        let (_dir, db) = setup_db().await;

        let a = db.create_task("keep", None).await.unwrap();
        let b = db.create_task("remove", None).await.unwrap();

        let affected = db.delete_task(b.id).await.unwrap();
        assert_eq!(affected, 1);

        let tasks = db.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, a.id);
    }

    #[tokio::test]
    async fn unknown_id_is_a_silent_noop() {
        let (_dir, db) = setup_db().await;

        let created = db.create_task("keep me", None).await.unwrap();
        let affected = db.delete_task(created.id + 999).await.unwrap();
        assert_eq!(affected, 0);
        assert_eq!(db.list_tasks().await.unwrap().len(), 1);
    }
}

mod lifecycle_tests {
    use super::*;

    #[tokio::test]
    async fn full_task_lifecycle() {
        let (_dir, db) = setup_db().await;

        let created = db.create_task("Buy milk", Some("2%")).await.unwrap();
        let tasks = db.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].status, TaskStatus::Pending);

        db.complete_task(created.id).await.unwrap();
        let tasks = db.list_tasks().await.unwrap();
        assert_eq!(tasks[0].status, TaskStatus::Completed);
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(tasks[0].description.as_deref(), Some("2%"));
        assert_eq!(tasks[0].created_at, created.created_at);

        db.delete_task(created.id).await.unwrap();
        assert!(db.list_tasks().await.unwrap().is_empty());
    }
}

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn ping_succeeds_against_a_reachable_store() {
        let (_dir, db) = setup_db().await;
        db.ping().await.expect("ping should succeed");
    }

    #[tokio::test]
    async fn ping_fails_once_the_pool_is_closed() {
        let (_dir, db) = setup_db().await;
        db.pool().close().await;
        assert!(db.ping().await.is_err());
    }
}
