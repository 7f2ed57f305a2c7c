//! User record
//!
//! Users are created by the upstream identity provider. The Kanban service
//! only reads them: to resolve members by email and to render names in
//! activity text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A person who can own boards, join them, and be assigned to tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Email address, unique across users
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Optional avatar URL
    pub avatar_url: Option<String>,

    /// When the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a new user record with a fresh ID
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            avatar_url: None,
            created_at: Utc::now(),
        }
    }
}
