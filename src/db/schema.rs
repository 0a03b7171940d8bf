//! Idempotent schema initialization, run once at process start.

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use sqlx::Connection;
use sqlx::AnyConnection;
use tracing::info;

const CREATE_TASKS_MYSQL: &str = "\
CREATE TABLE IF NOT EXISTS tasks (
    id BIGINT AUTO_INCREMENT PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    description TEXT,
    status VARCHAR(50) NOT NULL DEFAULT 'pending',
    created_at BIGINT NOT NULL
)";

const CREATE_TASKS_SQLITE: &str = "\
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    status TEXT NOT NULL DEFAULT 'pending',
    created_at INTEGER NOT NULL
)";

/// Create the target database if it does not exist yet.
///
/// Uses a short-lived server-level connection because the pool itself
/// selects the database. Embedded backends create their file on open, so
/// this step only applies to MySQL.
pub async fn ensure_database(config: &StoreConfig) -> StoreResult<()> {
    super::install_drivers();
    let mut conn = AnyConnection::connect(&config.server_url())
        .await
        .map_err(StoreError::SchemaInit)?;
    // DDL statements cannot take bind parameters; the name comes from
    // trusted configuration, not user input.
    sqlx::query(&format!(
        "CREATE DATABASE IF NOT EXISTS `{}`",
        config.database
    ))
    .execute(&mut conn)
    .await
    .map_err(StoreError::SchemaInit)?;
    conn.close().await.map_err(StoreError::SchemaInit)?;
    info!(database = %config.database, "Database ensured");
    Ok(())
}

/// Create the `tasks` table if it does not exist yet. Idempotent: running
/// against an already-initialized store is a successful no-op.
pub async fn ensure_tasks_table(db: &super::Database) -> StoreResult<()> {
    let mut conn = db.pool().acquire().await.map_err(StoreError::SchemaInit)?;
    let ddl = match conn.backend_name() {
        "SQLite" => CREATE_TASKS_SQLITE,
        _ => CREATE_TASKS_MYSQL,
    };
    sqlx::query(ddl)
        .execute(&mut *conn)
        .await
        .map_err(StoreError::SchemaInit)?;
    info!("Tasks table ensured");
    Ok(())
}
