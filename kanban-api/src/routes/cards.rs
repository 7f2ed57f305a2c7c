//! Task (card) endpoints
//!
//! Every route here is also mounted under `/api/tasks` and
//! `/api/lists/:id/tasks`.
//!
//! # Endpoints
//!
//! - `GET /api/lists/:id/cards` - Tasks of a list, ascending by order
//! - `POST /api/lists/:id/cards` - Append a task
//! - `GET /api/cards/:id` - Read task
//! - `PUT /api/cards/:id` - Update any subset of fields
//! - `DELETE /api/cards/:id` - Delete task
//! - `PUT /api/cards/:id/move` - Move to `{ listId, order }`
//! - `POST /api/cards/:id/assign` - Assign `{ userId }`
//! - `DELETE /api/cards/:id/assign/:user_id` - Unassign

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{ApiJson, ApiPath},
    response::{ApiResponse, Empty},
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use kanban_shared::{
    auth::middleware::AuthContext,
    models::task::{AssignUser, CreateTask, MoveTask, Task, UpdateTask},
};
use uuid::Uuid;

pub async fn list_cards(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(list_id): ApiPath<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<Task>>>> {
    let tasks = state.service.tasks_for_list(auth.user_id, list_id).await?;
    Ok(ApiResponse::list(tasks))
}

/// Create task
///
/// # Endpoint
///
/// ```text
/// POST /api/lists/:id/cards
///
/// {
///   "title": "Write release notes",
///   "description": "Cover the API changes",
///   "dueDate": "2025-03-01T00:00:00Z",
///   "labels": [{ "color": "red", "text": "urgent" }]
/// }
/// ```
///
/// The task is placed after the last task of the list.
pub async fn create_card(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(list_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<CreateTask>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Task>>)> {
    let task = state
        .service
        .create_task(auth.user_id, list_id, body)
        .await?;
    Ok(ApiResponse::created(task))
}

pub async fn get_card(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let task = state.service.get_task(auth.user_id, id).await?;
    Ok(ApiResponse::ok(task))
}

/// Update task
///
/// Absent fields are untouched; `"dueDate": null` clears the due date.
pub async fn update_card(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateTask>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let task = state.service.update_task(auth.user_id, id, body).await?;
    Ok(ApiResponse::ok(task))
}

pub async fn delete_card(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<ApiResponse<Empty>>> {
    state.service.delete_task(auth.user_id, id).await?;
    Ok(ApiResponse::ok(Empty {}))
}

/// Move task
///
/// # Endpoint
///
/// ```text
/// PUT /api/cards/:id/move
///
/// { "listId": "…", "order": 0 }
/// ```
///
/// `destinationListId` is accepted in place of `listId`. Moving to a list
/// on another board answers 400.
pub async fn move_card(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<MoveTask>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let task = state.service.move_task(auth.user_id, id, body).await?;
    Ok(ApiResponse::ok(task))
}

pub async fn assign_user(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<AssignUser>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let task = state.service.assign_user(auth.user_id, id, body).await?;
    Ok(ApiResponse::ok(task))
}

pub async fn unassign_user(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath((id, user_id)): ApiPath<(Uuid, Uuid)>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let task = state
        .service
        .unassign_user(auth.user_id, id, user_id)
        .await?;
    Ok(ApiResponse::ok(task))
}
