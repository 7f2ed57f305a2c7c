//! Activity recorder
//!
//! Every mutating operation describes what it did as an [`ActivityKind`].
//! The kind renders its own text and decides its entity and action type, so
//! adding a new kind forces all three to be written down together.
//!
//! Text that mentions a previous value (renames, moves) must be built from
//! the entity as it was read before the mutation.
//!
//! Writes happen after the primary mutation has been stored. A failed write
//! is logged and dropped: the operation still succeeds and the feed simply
//! misses that entry.

use chrono::Utc;
use uuid::Uuid;

use crate::models::activity::{ActionType, Activity, EntityType};
use crate::store::Store;

/// Everything the feed knows how to describe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityKind {
    BoardCreated,
    BoardUpdated,
    MemberAdded { name: String },
    MemberRemoved { name: String },
    ListCreated { title: String },
    ListRenamed { from: String, to: String },
    ListMoved { title: String },
    ListDeleted { title: String },
    ListsReordered,
    TaskCreated { title: String, list: String },
    TaskRenamed { from: String, to: String },
    TaskCompletion { title: String, completed: bool },
    TaskEdited { title: String },
    TaskDeleted { title: String },
    TaskMoved { title: String, from: String, to: String },
    UserAssigned { name: String, task: String },
    UserUnassigned { name: String, task: String },
}

impl ActivityKind {
    /// Human-readable text stored with the activity
    pub fn text(&self) -> String {
        match self {
            ActivityKind::BoardCreated => "created this board".to_string(),
            ActivityKind::BoardUpdated => "updated this board".to_string(),
            ActivityKind::MemberAdded { name } => format!("added {} to this board", name),
            ActivityKind::MemberRemoved { name } => format!("removed {} from this board", name),
            ActivityKind::ListCreated { title } => format!("added {} to this board", title),
            ActivityKind::ListRenamed { from, to } => {
                format!("renamed list \"{}\" to \"{}\"", from, to)
            }
            ActivityKind::ListMoved { title } => format!("moved list \"{}\"", title),
            ActivityKind::ListDeleted { title } => format!("deleted list {}", title),
            ActivityKind::ListsReordered => "reordered lists on this board".to_string(),
            ActivityKind::TaskCreated { title, list } => {
                format!("added task \"{}\" to {}", title, list)
            }
            ActivityKind::TaskRenamed { from, to } => {
                format!("renamed task \"{}\" to \"{}\"", from, to)
            }
            ActivityKind::TaskCompletion { title, completed } => format!(
                "marked task \"{}\" as {}",
                title,
                if *completed { "complete" } else { "incomplete" }
            ),
            ActivityKind::TaskEdited { title } => format!("updated task \"{}\"", title),
            ActivityKind::TaskDeleted { title } => format!("deleted task \"{}\"", title),
            ActivityKind::TaskMoved { title, from, to } => format!(
                "moved task \"{}\" from list \"{}\" to \"{}\"",
                title, from, to
            ),
            ActivityKind::UserAssigned { name, task } => {
                format!("assigned {} to task \"{}\"", name, task)
            }
            ActivityKind::UserUnassigned { name, task } => {
                format!("removed {} from task \"{}\"", name, task)
            }
        }
    }

    /// Action type stored with the activity
    pub fn action_type(&self) -> ActionType {
        match self {
            ActivityKind::BoardCreated
            | ActivityKind::ListCreated { .. }
            | ActivityKind::TaskCreated { .. } => ActionType::Create,
            ActivityKind::BoardUpdated
            | ActivityKind::MemberAdded { .. }
            | ActivityKind::MemberRemoved { .. }
            | ActivityKind::ListRenamed { .. }
            | ActivityKind::TaskRenamed { .. }
            | ActivityKind::TaskEdited { .. }
            | ActivityKind::UserUnassigned { .. } => ActionType::Update,
            ActivityKind::TaskCompletion { completed, .. } => {
                if *completed {
                    ActionType::Complete
                } else {
                    ActionType::Update
                }
            }
            ActivityKind::ListMoved { .. }
            | ActivityKind::ListsReordered
            | ActivityKind::TaskMoved { .. } => ActionType::Move,
            ActivityKind::ListDeleted { .. } | ActivityKind::TaskDeleted { .. } => {
                ActionType::Delete
            }
            ActivityKind::UserAssigned { .. } => ActionType::Assign,
        }
    }

    /// Entity type stored with the activity
    pub fn entity_type(&self) -> EntityType {
        match self {
            ActivityKind::BoardCreated
            | ActivityKind::BoardUpdated
            | ActivityKind::MemberAdded { .. }
            | ActivityKind::MemberRemoved { .. }
            | ActivityKind::ListsReordered => EntityType::Board,
            ActivityKind::ListCreated { .. }
            | ActivityKind::ListRenamed { .. }
            | ActivityKind::ListMoved { .. }
            | ActivityKind::ListDeleted { .. } => EntityType::List,
            ActivityKind::TaskCreated { .. }
            | ActivityKind::TaskRenamed { .. }
            | ActivityKind::TaskCompletion { .. }
            | ActivityKind::TaskEdited { .. }
            | ActivityKind::TaskDeleted { .. }
            | ActivityKind::TaskMoved { .. }
            | ActivityKind::UserAssigned { .. }
            | ActivityKind::UserUnassigned { .. } => EntityType::Card,
        }
    }
}

/// Where an activity is filed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub board_id: Uuid,
    pub list_id: Option<Uuid>,
    pub task_id: Option<Uuid>,
}

impl Scope {
    /// Board-level scope
    pub fn board(board_id: Uuid) -> Self {
        Self {
            board_id,
            list_id: None,
            task_id: None,
        }
    }

    /// Board and list scope
    pub fn list(board_id: Uuid, list_id: Uuid) -> Self {
        Self {
            board_id,
            list_id: Some(list_id),
            task_id: None,
        }
    }

    /// Board, list and task scope
    pub fn task(board_id: Uuid, list_id: Uuid, task_id: Uuid) -> Self {
        Self {
            board_id,
            list_id: Some(list_id),
            task_id: Some(task_id),
        }
    }
}

/// Builds the activity row for `kind`
pub fn build(kind: &ActivityKind, scope: Scope, actor: Uuid) -> Activity {
    Activity {
        id: Uuid::new_v4(),
        text: kind.text(),
        entity_type: kind.entity_type(),
        action_type: kind.action_type(),
        board_id: scope.board_id,
        list_id: scope.list_id,
        task_id: scope.task_id,
        user_id: actor,
        created_at: Utc::now(),
    }
}

/// Collects the activities produced by one operation and writes them together
///
/// ```
/// use kanban_shared::service::activity::{ActivityKind, ActivityLog, Scope};
/// use uuid::Uuid;
///
/// let mut log = ActivityLog::new(Uuid::new_v4());
/// assert!(log.is_empty());
///
/// log.push(ActivityKind::BoardCreated, Scope::board(Uuid::new_v4()));
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Debug)]
pub struct ActivityLog {
    actor: Uuid,
    entries: Vec<Activity>,
}

impl ActivityLog {
    /// Starts an empty log for an acting user
    pub fn new(actor: Uuid) -> Self {
        Self {
            actor,
            entries: Vec::new(),
        }
    }

    /// Queues one activity
    pub fn push(&mut self, kind: ActivityKind, scope: Scope) {
        self.entries.push(build(&kind, scope, self.actor));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes every queued activity
    ///
    /// Returns the number of activities stored: `0` when the log was empty
    /// or the write failed.
    pub async fn commit(self, store: &dyn Store) -> usize {
        if self.entries.is_empty() {
            return 0;
        }

        match store.insert_activities(&self.entries).await {
            Ok(()) => {
                tracing::debug!(
                    count = self.entries.len(),
                    user_id = %self.actor,
                    "Recorded activities"
                );
                self.entries.len()
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    count = self.entries.len(),
                    user_id = %self.actor,
                    "Failed to record activities; continuing"
                );
                0
            }
        }
    }
}

/// Records a single activity
pub async fn record(store: &dyn Store, actor: Uuid, kind: ActivityKind, scope: Scope) -> usize {
    let mut log = ActivityLog::new(actor);
    log.push(kind, scope);
    log.commit(store).await
}
