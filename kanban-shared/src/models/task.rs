//! Task (card) record
//!
//! A task lives in exactly one list and is ranked inside it by `order`.
//! `board_id` duplicates `list.board_id`; it is recomputed from the list at
//! every write that sets `list_id` and never taken from caller input.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE tasks (
//!     id UUID PRIMARY KEY,
//!     title VARCHAR(100) NOT NULL,
//!     description TEXT NOT NULL DEFAULT '',
//!     list_id UUID NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
//!     board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
//!     "order" BIGINT NOT NULL DEFAULT 0,
//!     due_date TIMESTAMPTZ,
//!     labels JSONB NOT NULL DEFAULT '[]',
//!     assigned_to UUID[] NOT NULL DEFAULT '{}',
//!     created_by UUID NOT NULL,
//!     completed BOOLEAN NOT NULL DEFAULT FALSE,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//!
//! CREATE INDEX idx_tasks_list_order ON tasks (list_id, "order");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::{deserialize_due_date, deserialize_some_due_date};
use super::list::List;

/// Label colors accepted on a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
    #[default]
    Blue,
}

impl LabelColor {
    /// Converts color to its wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelColor::Green => "green",
            LabelColor::Yellow => "yellow",
            LabelColor::Orange => "orange",
            LabelColor::Red => "red",
            LabelColor::Purple => "purple",
            LabelColor::Blue => "blue",
        }
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "green" => Ok(LabelColor::Green),
            "yellow" => Ok(LabelColor::Yellow),
            "orange" => Ok(LabelColor::Orange),
            "red" => Ok(LabelColor::Red),
            "purple" => Ok(LabelColor::Purple),
            "blue" => Ok(LabelColor::Blue),
            other => Err(format!("unknown label color: {}", other)),
        }
    }
}

/// A colored tag on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Label {
    /// Label color
    #[serde(default)]
    pub color: LabelColor,

    /// Short label text
    #[serde(default)]
    #[validate(length(max = 20, message = "Label text must be at most 20 characters"))]
    pub text: String,
}

/// Task model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Task title
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    /// Free-text description
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: String,

    /// Owning list
    #[serde(rename = "list")]
    pub list_id: Uuid,

    /// Owning board, always equal to the owning list's board
    #[serde(rename = "board")]
    pub board_id: Uuid,

    /// Rank within the owning list
    pub order: i64,

    /// Optional due date
    #[serde(default, deserialize_with = "deserialize_due_date")]
    pub due_date: Option<DateTime<Utc>>,

    /// Ordered labels
    #[validate(nested)]
    pub labels: Vec<Label>,

    /// Assigned users, each a board member
    pub assigned_to: Vec<Uuid>,

    /// User who created the task
    pub created_by: Uuid,

    /// Completion flag
    pub completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Optional due date, RFC 3339 or `YYYY-MM-DD`
    #[serde(default, deserialize_with = "deserialize_due_date")]
    pub due_date: Option<DateTime<Utc>>,

    /// Labels
    #[serde(default)]
    pub labels: Vec<Label>,
}

/// Input for updating a task
///
/// Absent fields are left untouched. `dueDate: null` clears the due date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    /// New title
    #[serde(default)]
    pub title: Option<String>,

    /// New description
    #[serde(default)]
    pub description: Option<String>,

    /// New due date (use Some(None) to clear)
    #[serde(default, deserialize_with = "deserialize_some_due_date")]
    pub due_date: Option<Option<DateTime<Utc>>>,

    /// Replacement labels
    #[serde(default)]
    pub labels: Option<Vec<Label>>,

    /// New completion flag
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Input for moving a task
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTask {
    /// Destination list (same board as the task)
    #[serde(alias = "destinationListId")]
    pub list_id: Uuid,

    /// Destination rank, written verbatim
    pub order: i64,
}

/// Input for assigning a user
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignUser {
    /// User to assign
    pub user_id: Uuid,
}

impl Task {
    /// Builds a new task at rank `order` in `list`
    ///
    /// The board is taken from the list, never from caller input.
    pub fn new(list: &List, created_by: Uuid, order: i64, data: CreateTask) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: data.title.trim().to_string(),
            description: data
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            list_id: list.id,
            board_id: list.board_id,
            order,
            due_date: data.due_date,
            labels: normalize_labels(data.labels),
            assigned_to: Vec::new(),
            created_by,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks if `user_id` is assigned to this task
    pub fn is_assigned(&self, user_id: Uuid) -> bool {
        self.assigned_to.contains(&user_id)
    }
}

/// Trims label text
pub fn normalize_labels(labels: Vec<Label>) -> Vec<Label> {
    labels
        .into_iter()
        .map(|label| Label {
            color: label.color,
            text: label.text.trim().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> List {
        List::new(Uuid::new_v4(), "Backlog", 0)
    }

    fn create(title: &str) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            description: None,
            due_date: None,
            labels: Vec::new(),
        }
    }

    #[test]
    fn test_new_task_takes_board_from_list() {
        let list = list();
        let task = Task::new(&list, Uuid::new_v4(), 4, create(" Write docs "));

        assert_eq!(task.title, "Write docs");
        assert_eq!(task.list_id, list.id);
        assert_eq!(task.board_id, list.board_id);
        assert_eq!(task.order, 4);
        assert_eq!(task.description, "");
        assert!(!task.completed);
        assert!(task.validate().is_ok());
    }

    #[test]
    fn test_title_too_long_is_invalid() {
        let task = Task::new(&list(), Uuid::new_v4(), 0, create(&"x".repeat(101)));
        assert!(task.validate().is_err());
    }

    #[test]
    fn test_label_text_limit() {
        let mut task = Task::new(&list(), Uuid::new_v4(), 0, create("Ship"));
        task.labels.push(Label {
            color: LabelColor::Red,
            text: "x".repeat(21),
        });

        let errors = task.validate().unwrap_err();
        assert!(errors.errors().contains_key("labels"));
    }

    #[test]
    fn test_label_color_defaults_to_blue() {
        let label: Label = serde_json::from_str(r#"{"text": "bug"}"#).unwrap();
        assert_eq!(label.color, LabelColor::Blue);

        let bad: Result<Label, _> = serde_json::from_str(r#"{"color": "pink"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_label_color_round_trip_str() {
        for color in [LabelColor::Green, LabelColor::Purple, LabelColor::Blue] {
            assert_eq!(color.as_str().parse::<LabelColor>().unwrap(), color);
        }
        assert!("teal".parse::<LabelColor>().is_err());
    }

    #[test]
    fn test_move_accepts_destination_alias() {
        let list_id = Uuid::new_v4();
        let body = format!(r#"{{"destinationListId": "{}", "order": 2}}"#, list_id);
        let mv: MoveTask = serde_json::from_str(&body).unwrap();

        assert_eq!(mv.list_id, list_id);
        assert_eq!(mv.order, 2);
    }

    #[test]
    fn test_update_due_date_null_clears() {
        let patch: UpdateTask = serde_json::from_str(r#"{"dueDate": null}"#).unwrap();
        assert_eq!(patch.due_date, Some(None));

        let patch: UpdateTask = serde_json::from_str(r#"{"completed": true}"#).unwrap();
        assert!(patch.due_date.is_none());
        assert_eq!(patch.completed, Some(true));
    }

    #[test]
    fn test_due_date_accepts_plain_date() {
        let midnight = "2025-05-20T00:00:00Z".parse::<DateTime<Utc>>().unwrap();

        let input: CreateTask =
            serde_json::from_str(r#"{"title": "x", "dueDate": "2025-05-20"}"#).unwrap();
        assert_eq!(input.due_date, Some(midnight));

        let input: CreateTask =
            serde_json::from_str(r#"{"title": "x", "dueDate": "2025-05-20T09:30:00+02:00"}"#)
                .unwrap();
        assert_eq!(
            input.due_date,
            Some("2025-05-20T07:30:00Z".parse::<DateTime<Utc>>().unwrap())
        );

        let patch: UpdateTask = serde_json::from_str(r#"{"dueDate": "2025-05-20"}"#).unwrap();
        assert_eq!(patch.due_date, Some(Some(midnight)));

        let bad: Result<CreateTask, _> =
            serde_json::from_str(r#"{"title": "x", "dueDate": "next tuesday"}"#);
        assert!(bad.is_err());
    }
}
