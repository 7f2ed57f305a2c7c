//! Board activity feed
//!
//! # Endpoint
//!
//! ```text
//! GET /api/boards/:id/activities?limit=20
//! ```
//!
//! Newest first. `limit` defaults to `ACTIVITY_FEED_LIMIT` and is clamped
//! to 1..=200.

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{ApiPath, ApiQuery},
    response::ApiResponse,
};
use axum::{
    extract::State,
    Json,
};
use kanban_shared::{auth::middleware::AuthContext, models::activity::Activity};
use serde::Deserialize;
use uuid::Uuid;

/// Feed query parameters
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    /// Maximum number of entries
    pub limit: Option<usize>,
}

pub async fn list_activities(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(board_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<FeedQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Activity>>>> {
    let limit = query.limit.unwrap_or(state.config.activity.feed_limit);
    let activities = state
        .service
        .activities(auth.user_id, board_id, limit)
        .await?;
    Ok(ApiResponse::list(activities))
}
