//! Success envelope shared by every endpoint
//!
//! ```json
//! { "success": true, "count": 2, "data": [ ... ] }
//! ```
//!
//! `count` is present only for collections.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// Success response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true`
    pub success: bool,

    /// Number of items when `data` is a collection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// Payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps a single item
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            count: None,
            data,
        })
    }

    /// Wraps a single newly created item with `201 Created`
    pub fn created(data: T) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Self::ok(data))
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Wraps a collection and sets `count`
    pub fn list(data: Vec<T>) -> Json<Self> {
        Json(Self {
            success: true,
            count: Some(data.len()),
            data,
        })
    }
}

/// Empty object payload for deletions
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Empty {}
