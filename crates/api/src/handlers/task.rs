//! Handlers for the `/tasks` resource (study planner).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use recallr_core::error::CoreError;
use recallr_core::task::{parse_task_deck_id, validate_task_input};
use recallr_core::types::DbId;
use recallr_db::models::task::{CreateTask, Task, TaskWithDeck};
use recallr_db::repositories::TaskRepo;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /tasks`. `deck_id` may be a number or a numeric
/// string, as form-backed clients send it.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TaskRequest {
    pub deck_id: Option<Value>,
    pub task_time: String,
    pub color: String,
}

/// Request body for `PATCH /tasks/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub completed: bool,
}

fn task_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Task", id })
}

/// GET /api/v1/tasks
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<TaskWithDeck>>>> {
    let tasks = TaskRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// POST /api/v1/tasks
///
/// The referenced deck must belong to the caller.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<TaskRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Task>>)> {
    let deck_id = parse_task_deck_id(input.deck_id.as_ref())?;
    let task_time = validate_task_input(&input.task_time, &input.color)?;

    let task = TaskRepo::create(
        &state.pool,
        &CreateTask {
            user_id: auth.user_id,
            deck_id,
            task_time,
            color: input.color.trim().to_string(),
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Deck",
        id: deck_id,
    }))?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// PATCH /api/v1/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTaskRequest>,
) -> AppResult<Json<DataResponse<Task>>> {
    let task = TaskRepo::set_completed(&state.pool, id, auth.user_id, input.completed)
        .await?
        .ok_or_else(|| task_not_found(id))?;
    Ok(Json(DataResponse { data: task }))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TaskRepo::delete(&state.pool, id, auth.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(task_not_found(id))
    }
}
