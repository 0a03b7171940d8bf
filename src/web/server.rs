//! HTTP server implementation.
//!
//! This module provides the axum-based HTTP server that serves the task
//! list UI and the health endpoint. Handlers are thin glue: each one makes
//! a single task store call and produces a page render or a redirect.
//! Store errors never propagate to the client as faults; the user sees a
//! message and the process keeps serving. The one exception is `/health`,
//! which intentionally reports a 500 when the store is down.

use axum::{
    Router,
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::get,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::templates;
use crate::config::HttpConfig;
use crate::db::Database;
use crate::types::{Task, TaskStatus, validate_title};

/// Server state shared across handlers.
#[derive(Clone)]
pub struct WebServer {
    /// Reference to the task database.
    db: Arc<Database>,
}

impl WebServer {
    /// Create a new server instance.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Get the database reference.
    pub fn db(&self) -> &Arc<Database> {
        &self.db
    }
}

/// Health check response.
#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Format an epoch-milliseconds timestamp as a human-readable date string.
fn format_timestamp(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Render the `msg` query parameter into a message banner, if present.
/// The value carries a `success:` or `error:` prefix selecting the style.
fn render_message(params: &HashMap<String, String>) -> String {
    params
        .get("msg")
        .map(|m| {
            let (class, text) = if let Some(stripped) = m.strip_prefix("success:") {
                ("message-success", stripped)
            } else if let Some(stripped) = m.strip_prefix("error:") {
                ("message-error", stripped)
            } else {
                ("message-success", m.as_str())
            };
            format!(
                r#"<div class="message {}">{}</div>"#,
                class,
                html_escape(text)
            )
        })
        .unwrap_or_default()
}

/// Redirect to the index page carrying a message banner.
fn redirect_with_message(message: &str) -> Redirect {
    Redirect::to(&format!("/?msg={}", urlencoding::encode(message)))
}

/// Render the task table as an HTML fragment.
fn render_task_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return r#"<div class="empty-state">No tasks yet. Add one to get started.</div>"#
            .to_string();
    }

    let mut html = String::from(
        "<table><thead><tr><th>Task</th><th>Status</th><th>Created</th><th>Actions</th></tr></thead><tbody>",
    );

    for task in tasks {
        let (badge_class, row_class) = match task.status {
            TaskStatus::Completed => ("badge-success", "task-done"),
            TaskStatus::Pending => ("badge-pending", ""),
        };

        let description = task
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|d| format!(r#"<div class="task-desc">{}</div>"#, html_escape(d)))
            .unwrap_or_default();

        let complete_link = match task.status {
            TaskStatus::Pending => format!(r#"<a href="/complete/{}">Complete</a> "#, task.id),
            TaskStatus::Completed => String::new(),
        };

        html.push_str(&format!(
            r#"<tr class="{row_class}">
                <td><span class="task-title">{title}</span>{description}</td>
                <td><span class="badge {badge_class}">{status}</span></td>
                <td>{created}</td>
                <td>{complete_link}<a href="/delete/{id}">Delete</a></td>
            </tr>"#,
            row_class = row_class,
            title = html_escape(&task.title),
            description = description,
            badge_class = badge_class,
            status = task.status,
            created = format_timestamp(task.created_at),
            complete_link = complete_link,
            id = task.id,
        ));
    }

    html.push_str("</tbody></table>");
    html
}

/// Index page - lists all tasks, newest first.
///
/// A store error renders the page with an empty list and a message instead
/// of failing the request.
async fn index(
    State(state): State<WebServer>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let mut message = render_message(&params);

    let tasks = match state.db().list_tasks().await {
        Ok(tasks) => tasks,
        Err(e) => {
            warn!(error = %e, "Failed to list tasks");
            message = format!(
                r#"<div class="message message-error">Database error: {}</div>"#,
                html_escape(&e.to_string())
            );
            Vec::new()
        }
    };

    Html(
        templates::INDEX_TEMPLATE
            .replace("{{message}}", &message)
            .replace("{{tasks}}", &render_task_table(&tasks)),
    )
}

/// Render the add-task form with an optional message banner.
fn render_add_form(message: &str) -> Html<String> {
    Html(templates::ADD_TASK_TEMPLATE.replace("{{message}}", message))
}

/// Add form page.
async fn add_form() -> Html<String> {
    render_add_form("")
}

/// Form data for task creation.
#[derive(Debug, serde::Deserialize)]
struct NewTaskForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

/// Handle the add-task form submission.
///
/// Title validation happens here, before any write reaches the store. A
/// validation failure re-renders the form with a message and HTTP 200.
async fn add_submit(State(state): State<WebServer>, Form(form): Form<NewTaskForm>) -> Response {
    if let Err(message) = validate_title(&form.title) {
        return render_add_form(&format!(
            r#"<div class="message message-error">{}</div>"#,
            html_escape(&message)
        ))
        .into_response();
    }

    let description = Some(form.description.as_str()).filter(|d| !d.is_empty());
    match state.db().create_task(&form.title, description).await {
        Ok(task) => {
            info!(id = task.id, "Task created");
            redirect_with_message("success:Task added successfully!").into_response()
        }
        Err(e) => {
            warn!(error = %e, "Failed to create task");
            render_add_form(&format!(
                r#"<div class="message message-error">Error adding task: {}</div>"#,
                html_escape(&e.to_string())
            ))
            .into_response()
        }
    }
}

/// Mark a task as completed, then return to the list.
///
/// An unknown id affects zero rows and still redirects with the success
/// message, matching the store's silent no-op semantics.
async fn complete_task(State(state): State<WebServer>, Path(id): Path<i64>) -> Redirect {
    match state.db().complete_task(id).await {
        Ok(_) => redirect_with_message("success:Task marked as completed!"),
        Err(e) => {
            warn!(id, error = %e, "Failed to complete task");
            redirect_with_message(&format!("error:Error updating task: {}", e))
        }
    }
}

/// Delete a task, then return to the list.
async fn delete_task(State(state): State<WebServer>, Path(id): Path<i64>) -> Redirect {
    match state.db().delete_task(id).await {
        Ok(_) => redirect_with_message("success:Task deleted successfully!"),
        Err(e) => {
            warn!(id, error = %e, "Failed to delete task");
            redirect_with_message(&format!("error:Error deleting task: {}", e))
        }
    }
}

/// Health check endpoint.
///
/// Probes the store with a constant query. Reports 200 with
/// `database: connected` on success, 500 with the error detail otherwise.
async fn health(State(state): State<WebServer>) -> Response {
    let timestamp = chrono::Utc::now().to_rfc3339();
    match state.db().ping().await {
        Ok(()) => Json(HealthResponse {
            status: "healthy",
            timestamp,
            database: "connected",
            error: None,
        })
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HealthResponse {
                status: "unhealthy",
                timestamp,
                database: "disconnected",
                error: Some(e.to_string()),
            }),
        )
            .into_response(),
    }
}

/// Build the router with all routes.
pub fn build_router(state: WebServer) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/add", get(add_form).post(add_submit))
        .route("/complete/{id}", get(complete_task))
        .route("/delete/{id}", get(delete_task))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve the HTTP server until the process exits.
pub async fn start_server(db: Arc<Database>, config: &HttpConfig) -> anyhow::Result<()> {
    let state = WebServer::new(db);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Web server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
