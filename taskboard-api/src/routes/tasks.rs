/// Task endpoints
///
/// All routes require a bearer token.
///
/// - `GET    /tasks/:userId` - List a user's tasks
/// - `POST   /tasks`         - Create a task
/// - `PUT    /tasks/:id`     - Set a task's completed flag
/// - `DELETE /tasks/:id`     - Delete a task
///
/// Listing and creation only accept the authenticated user's own ID. Update
/// and delete address a task by ID alone and succeed whether or not it exists.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::middleware::AuthContext,
    models::task::{CreateTask, Task},
};

/// Create task request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Owning user ID
    pub user_id: i64,

    /// Task text
    pub text: String,
}

/// Create task response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTaskResponse {
    /// Generated task ID
    pub id: i64,

    /// Echoed task text
    pub text: String,

    /// Always false for a new task
    pub completed: bool,
}

/// Toggle request
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    /// New completion flag
    pub completed: bool,
}

/// Generic acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

fn ensure_self(auth: &AuthContext, user_id: i64) -> ApiResult<()> {
    if auth.is_user(user_id) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "Cannot access another user's tasks".to_string(),
        ))
    }
}

/// List every task of a user
///
/// ```text
/// GET /tasks/1
/// Authorization: Bearer eyJ...
/// ```
///
/// # Response
///
/// ```json
/// [{ "id": 1, "user_id": 1, "text": "buy milk", "completed": false }]
/// ```
///
/// Order is whatever the store returns.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    user_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<Task>>> {
    let Path(user_id) = user_id?;
    ensure_self(&auth, user_id)?;

    let tasks = state.store.list_tasks_by_user(user_id).await?;
    Ok(Json(tasks))
}

/// Create a task
///
/// ```text
/// POST /tasks
/// { "userId": 1, "text": "buy milk" }
/// ```
///
/// # Response
///
/// ```json
/// { "id": 1, "text": "buy milk", "completed": false }
/// ```
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<CreateTaskResponse>> {
    let Json(req) = payload?;
    ensure_self(&auth, req.user_id)?;

    let task = state
        .store
        .insert_task(CreateTask {
            user_id: req.user_id,
            text: req.text,
        })
        .await?;

    tracing::debug!(task_id = task.id, user_id = task.user_id, "Created task");

    Ok(Json(CreateTaskResponse {
        id: task.id,
        text: task.text,
        completed: task.completed,
    }))
}

/// Set the completed flag of a task
///
/// ```text
/// PUT /tasks/1
/// { "completed": true }
/// ```
pub async fn update_task(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let Path(id) = id?;
    let Json(req) = payload?;

    state.store.update_task_completed(id, req.completed).await?;
    Ok(SuccessResponse::ok())
}

/// Delete a task
///
/// ```text
/// DELETE /tasks/1
/// ```
pub async fn delete_task(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let Path(id) = id?;
    state.store.delete_task(id).await?;
    Ok(SuccessResponse::ok())
}
