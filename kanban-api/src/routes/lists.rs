//! List endpoints
//!
//! # Endpoints
//!
//! - `GET /api/boards/:id/lists` - Lists of a board, ascending by order
//! - `POST /api/boards/:id/lists` - Append a list
//! - `PUT /api/boards/:id/lists/reorder` - Apply `{ lists: [{ id, order }] }`
//! - `PUT /api/lists/:id` - Rename and/or re-rank
//! - `DELETE /api/lists/:id` - Delete list and its tasks

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
    models::list::{CreateList, List, ReorderLists, UpdateList},
};
use uuid::Uuid;

pub async fn list_lists(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(board_id): ApiPath<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<List>>>> {
    let lists = state.service.lists_for_board(auth.user_id, board_id).await?;
    Ok(ApiResponse::list(lists))
}

pub async fn create_list(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(board_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<CreateList>,
) -> ApiResult<(StatusCode, Json<ApiResponse<List>>)> {
    let list = state
        .service
        .create_list(auth.user_id, board_id, body)
        .await?;
    Ok(ApiResponse::created(list))
}

/// Batch reorder
///
/// Pairs are applied one at a time. When one fails the request answers 400
/// and the pairs before it remain applied.
pub async fn reorder_lists(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(board_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<ReorderLists>,
) -> ApiResult<Json<ApiResponse<Vec<List>>>> {
    let lists = state
        .service
        .reorder_lists(auth.user_id, board_id, body)
        .await?;
    Ok(ApiResponse::list(lists))
}

pub async fn update_list(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateList>,
) -> ApiResult<Json<ApiResponse<List>>> {
    let list = state.service.update_list(auth.user_id, id, body).await?;
    Ok(ApiResponse::ok(list))
}

pub async fn delete_list(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<ApiResponse<Empty>>> {
    state.service.delete_list(auth.user_id, id).await?;
    Ok(ApiResponse::ok(Empty {}))
}
