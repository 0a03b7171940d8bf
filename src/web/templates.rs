//! HTML templates for the web UI.
//!
//! Templates are embedded at compile time using `include_str!` and filled
//! in by simple placeholder replacement in the handlers.

/// The task list page template.
pub const INDEX_TEMPLATE: &str = include_str!("templates/index.html");

/// The add-task form page template.
pub const ADD_TASK_TEMPLATE: &str = include_str!("templates/add_task.html");
