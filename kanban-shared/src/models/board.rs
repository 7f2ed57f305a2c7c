//! Board record
//!
//! A board is the top-level workspace. It has one owner and a set of invited
//! members. The owner is authoritative whether or not they also appear in
//! `members`.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE boards (
//!     id UUID PRIMARY KEY,
//!     title VARCHAR(100) NOT NULL,
//!     description TEXT,
//!     owner_id UUID NOT NULL,
//!     members UUID[] NOT NULL DEFAULT '{}',
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::deserialize_some;

/// Board model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique board ID
    pub id: Uuid,

    /// Board title
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    /// Optional free-text description
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    /// Owning user
    #[serde(rename = "owner")]
    pub owner_id: Uuid,

    /// Invited members (may or may not include the owner)
    pub members: Vec<Uuid>,

    /// When the board was created
    pub created_at: DateTime<Utc>,

    /// When the board was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoard {
    /// Board title
    pub title: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// Input for updating a board
///
/// Absent fields are left untouched. `description: null` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoard {
    /// New title
    #[serde(default)]
    pub title: Option<String>,

    /// New description (use Some(None) to clear)
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
}

/// Input for inviting a member by email
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddMember {
    /// Email of an existing user
    #[serde(default)]
    pub email: Option<String>,
}

impl Board {
    /// Builds a new board owned by `owner_id` with no invited members
    pub fn new(owner_id: Uuid, data: CreateBoard) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: data.title.trim().to_string(),
            description: data.description.map(|d| d.trim().to_string()),
            owner_id,
            members: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks if `user_id` owns this board
    pub fn is_owner(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Checks if `user_id` is in the invited member set
    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.members.contains(&user_id)
    }

    /// Checks if `user_id` may read and write this board (owner or member)
    pub fn has_access(&self, user_id: Uuid) -> bool {
        self.is_owner(user_id) || self.is_member(user_id)
    }
}
