//! Core task types shared between the store and the web layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task.
///
/// A task starts as `Pending` and may move once to `Completed`.
/// There is no reverse transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }

    /// Parse a status string from the store. Unknown values fall back to
    /// `Pending` so a hand-edited row never takes the page down.
    pub fn parse(s: &str) -> TaskStatus {
        match s {
            "completed" => TaskStatus::Completed,
            _ => TaskStatus::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single to-do item as stored in the `tasks` table.
///
/// `id` is assigned by the store on insert; `title`, `description` and
/// `created_at` are immutable after creation. Only `status` ever changes,
/// and only from pending to completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Epoch milliseconds, set once by the store at insert time.
    pub created_at: i64,
}

/// Validate a task title before it reaches the store.
///
/// Matches the original behavior exactly: only the empty string is
/// rejected. The caller is responsible for running this before any write.
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.is_empty() {
        return Err("Title is required!".to_string());
    }
    Ok(())
}
