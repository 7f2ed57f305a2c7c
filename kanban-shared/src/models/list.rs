//! List record
//!
//! A list is a column on a board. Lists are ranked among their siblings by
//! `order` (lower sorts first). Deleting a list cascades to its tasks and to
//! the activities scoped to it.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE lists (
//!     id UUID PRIMARY KEY,
//!     title VARCHAR(100) NOT NULL,
//!     board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
//!     "order" BIGINT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// List model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct List {
    /// Unique list ID
    pub id: Uuid,

    /// List title
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    /// Owning board
    #[serde(rename = "board")]
    pub board_id: Uuid,

    /// Rank among the lists of the same board
    pub order: i64,

    /// When the list was created
    pub created_at: DateTime<Utc>,

    /// When the list was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateList {
    /// List title
    pub title: String,
}

/// Input for updating a list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateList {
    /// New title
    #[serde(default)]
    pub title: Option<String>,

    /// New rank
    #[serde(default)]
    pub order: Option<i64>,
}

/// One entry of a batch reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOrder {
    /// List to update
    pub id: Uuid,

    /// New rank
    pub order: i64,
}

/// Batch reorder payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReorderLists {
    /// Entries applied one at a time, in the given sequence
    #[serde(default)]
    pub lists: Vec<ListOrder>,
}

impl List {
    /// Builds a new list on `board_id` at rank `order`
    pub fn new(board_id: Uuid, title: &str, order: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.trim().to_string(),
            board_id,
            order,
            created_at: now,
            updated_at: now,
        }
    }
}
