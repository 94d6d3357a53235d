//! # Task Management Handlers
//!
//! HTTP handlers for listing, creating, completing and deleting tasks.
//! Input is validated here; the store is never called with an empty title or
//! a non-integer id.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tracing::{debug, info};

use crate::constants::form_fields;
use crate::models::Task;
use crate::web::errors::{ApiError, ApiResult};
use crate::web::extractors::{parse_task_id, require_title, FormFields};
use crate::web::state::AppState;

/// List all tasks: GET /api/tasks
///
/// Responses are marked uncacheable so browsers always see the current list.
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let tasks = state.store.list_all().await?;
    debug!(count = tasks.len(), "Serving task list");

    Ok((
        [
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        Json(tasks),
    ))
}

/// Create a task: POST /api/add with form field `title`
pub async fn add_task(
    State(state): State<AppState>,
    fields: FormFields,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let title = require_title(fields.get(form_fields::TITLE))?;

    let task = state.store.add(title).await?;
    info!(task_id = task.id, "Task created via web API");

    Ok((StatusCode::CREATED, Json(task)))
}

/// Mark a task done: POST /api/done with form field `id`
pub async fn complete_task(
    State(state): State<AppState>,
    fields: FormFields,
) -> ApiResult<StatusCode> {
    let id = parse_task_id(fields.get(form_fields::ID))?;

    state.store.complete(id).await?;
    Ok(StatusCode::OK)
}

/// Delete a task: POST /api/delete with form field `id`
pub async fn delete_task(
    State(state): State<AppState>,
    fields: FormFields,
) -> ApiResult<StatusCode> {
    let id = parse_task_id(fields.get(form_fields::ID))?;

    state.store.delete(id).await?;
    Ok(StatusCode::OK)
}

/// Fallback for verbs a task route does not accept
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
