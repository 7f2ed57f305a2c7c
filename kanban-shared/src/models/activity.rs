//! Activity record
//!
//! Activities are append-only audit entries. Each one is scoped to a board
//! and optionally to a list and a task, names the acting user, and carries a
//! rendered human-readable `text`. Rows are never updated; they are only
//! removed by the board/list cascades.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE activities (
//!     id UUID PRIMARY KEY,
//!     text TEXT NOT NULL,
//!     entity_type VARCHAR(10) NOT NULL,
//!     action_type VARCHAR(10) NOT NULL,
//!     board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
//!     list_id UUID,
//!     task_id UUID,
//!     user_id UUID NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of entity an activity is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Board,
    List,
    Card,
}

impl EntityType {
    /// Converts entity type to string for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Board => "board",
            EntityType::List => "list",
            EntityType::Card => "card",
        }
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "board" => Ok(EntityType::Board),
            "list" => Ok(EntityType::List),
            "card" => Ok(EntityType::Card),
            other => Err(format!("unknown entity type: {}", other)),
        }
    }
}

/// What happened to the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Create,
    Update,
    Delete,
    Move,
    Assign,
    Complete,
}

impl ActionType {
    /// Converts action type to string for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Create => "create",
            ActionType::Update => "update",
            ActionType::Delete => "delete",
            ActionType::Move => "move",
            ActionType::Assign => "assign",
            ActionType::Complete => "complete",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(ActionType::Create),
            "update" => Ok(ActionType::Update),
            "delete" => Ok(ActionType::Delete),
            "move" => Ok(ActionType::Move),
            "assign" => Ok(ActionType::Assign),
            "complete" => Ok(ActionType::Complete),
            other => Err(format!("unknown action type: {}", other)),
        }
    }
}

/// Activity model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Unique activity ID
    pub id: Uuid,

    /// Rendered description, e.g. `moved task "X" from list "A" to "B"`
    pub text: String,

    /// Entity the activity is about
    #[serde(rename = "type")]
    pub entity_type: EntityType,

    /// What happened
    pub action_type: ActionType,

    /// Board scope (always set)
    #[serde(rename = "board")]
    pub board_id: Uuid,

    /// List scope
    #[serde(rename = "list")]
    pub list_id: Option<Uuid>,

    /// Task scope
    #[serde(rename = "task")]
    pub task_id: Option<Uuid>,

    /// Acting user
    #[serde(rename = "user")]
    pub user_id: Uuid,

    /// When the activity was recorded
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_type_round_trip_str() {
        for action in [
            ActionType::Create,
            ActionType::Update,
            ActionType::Delete,
            ActionType::Move,
            ActionType::Assign,
            ActionType::Complete,
        ] {
            assert_eq!(action.as_str().parse::<ActionType>().unwrap(), action);
        }
        assert!("archive".parse::<ActionType>().is_err());
    }

    #[test]
    fn test_entity_type_parse() {
        assert_eq!("card".parse::<EntityType>().unwrap(), EntityType::Card);
        assert!("task".parse::<EntityType>().is_err());
    }

    #[test]
    fn test_activity_wire_names() {
        let activity = Activity {
            id: Uuid::new_v4(),
            text: "created this board".to_string(),
            entity_type: EntityType::Board,
            action_type: ActionType::Create,
            board_id: Uuid::new_v4(),
            list_id: None,
            task_id: None,
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["type"], "board");
        assert_eq!(json["actionType"], "create");
        assert!(json["list"].is_null());
    }
}
