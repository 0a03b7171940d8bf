//! Task CRUD operations.
//!
//! Each operation is a single atomic statement: an insert, a one-row
//! update, a one-row delete, or a read-only scan. No multi-statement
//! transactions are needed.

use super::{Database, now_ms};
use crate::error::{StoreError, StoreResult};
use crate::types::{Task, TaskStatus};
use sqlx::Row;
use sqlx::any::AnyRow;

fn parse_task_row(row: &AnyRow) -> Result<Task, sqlx::Error> {
    let status: String = row.try_get("status")?;
    Ok(Task {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        status: TaskStatus::parse(&status),
        created_at: row.try_get("created_at")?,
    })
}

impl Database {
    /// List all tasks, newest first. Ties on `created_at` (inserts within
    /// the same millisecond) fall back to insertion order via the id.
    pub async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        let mut conn = self.pool().acquire().await?;
        let rows = sqlx::query(
            "SELECT id, title, description, status, created_at
             FROM tasks ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&mut *conn)
        .await?;

        rows.iter()
            .map(|row| parse_task_row(row).map_err(StoreError::Operation))
            .collect()
    }

    /// Insert a new task and return it with its store-assigned id.
    ///
    /// The title must already have passed validation in the calling layer;
    /// the store itself writes whatever it is given.
    pub async fn create_task(&self, title: &str, description: Option<&str>) -> StoreResult<Task> {
        let created_at = now_ms();
        let mut conn = self.pool().acquire().await?;
        let result = sqlx::query(
            "INSERT INTO tasks (title, description, status, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(title)
        .bind(description)
        .bind(TaskStatus::Pending.as_str())
        .bind(created_at)
        .execute(&mut *conn)
        .await?;

        let id = result
            .last_insert_id()
            .ok_or_else(|| StoreError::Operation(sqlx::Error::Protocol("no insert id".into())))?;

        Ok(Task {
            id,
            title: title.to_string(),
            description: description.map(str::to_string),
            status: TaskStatus::Pending,
            created_at,
        })
    }

    /// Mark a task completed. Returns the number of rows affected; an
    /// unknown id affects zero rows and is not an error.
    pub async fn complete_task(&self, id: i64) -> StoreResult<u64> {
        let mut conn = self.pool().acquire().await?;
        let result = sqlx::query("UPDATE tasks SET status = ? WHERE id = ?")
            .bind(TaskStatus::Completed.as_str())
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete a task. Returns the number of rows affected; an unknown id
    /// affects zero rows and is not an error.
    pub async fn delete_task(&self, id: i64) -> StoreResult<u64> {
        let mut conn = self.pool().acquire().await?;
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
