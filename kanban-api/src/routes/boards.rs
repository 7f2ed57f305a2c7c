//! Board and membership endpoints
//!
//! # Endpoints
//!
//! - `GET /api/boards` - Boards the caller owns or belongs to
//! - `POST /api/boards` - Create board
//! - `GET /api/boards/:id` - Read board
//! - `PUT /api/boards/:id` - Update title/description (owner only)
//! - `DELETE /api/boards/:id` - Delete board and everything on it (owner only)
//! - `PUT /api/boards/:id/members` - Add member by email (owner only)
//! - `DELETE /api/boards/:id/members/:user_id` - Remove member (owner only)

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
    models::board::{AddMember, Board, CreateBoard, UpdateBoard},
};
use uuid::Uuid;

/// List boards
pub async fn list_boards(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Json<ApiResponse<Vec<Board>>>> {
    let boards = state.service.list_boards(auth.user_id).await?;
    Ok(ApiResponse::list(boards))
}

/// Create board
///
/// # Endpoint
///
/// ```text
/// POST /api/boards
/// Authorization: Bearer <jwt_token>
/// Content-Type: application/json
///
/// { "title": "Product Launch", "description": "Everything for v1" }
/// ```
///
/// Responds `201 Created` with the board. The caller becomes its owner.
pub async fn create_board(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiJson(body): ApiJson<CreateBoard>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Board>>)> {
    let board = state.service.create_board(auth.user_id, body).await?;
    Ok(ApiResponse::created(board))
}

/// Read board
pub async fn get_board(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<ApiResponse<Board>>> {
    let board = state.service.get_board(auth.user_id, id).await?;
    Ok(ApiResponse::ok(board))
}

/// Update board
pub async fn update_board(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateBoard>,
) -> ApiResult<Json<ApiResponse<Board>>> {
    let board = state.service.update_board(auth.user_id, id, body).await?;
    Ok(ApiResponse::ok(board))
}

/// Delete board
pub async fn delete_board(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<ApiResponse<Empty>>> {
    state.service.delete_board(auth.user_id, id).await?;
    Ok(ApiResponse::ok(Empty {}))
}

/// Add member
///
/// # Endpoint
///
/// ```text
/// PUT /api/boards/:id/members
///
/// { "email": "max@example.com" }
/// ```
pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<AddMember>,
) -> ApiResult<Json<ApiResponse<Board>>> {
    let board = state.service.add_member(auth.user_id, id, body).await?;
    Ok(ApiResponse::ok(board))
}

/// Remove member
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath((id, user_id)): ApiPath<(Uuid, Uuid)>,
) -> ApiResult<Json<ApiResponse<Board>>> {
    let board = state
        .service
        .remove_member(auth.user_id, id, user_id)
        .await?;
    Ok(ApiResponse::ok(board))
}
