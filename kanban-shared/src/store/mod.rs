//! Persistence seam
//!
//! Services talk to storage only through the [`Store`] trait. Each method is
//! a single primitive read or write; there is no multi-call transaction at
//! this level, so sequences of calls made by one request are not atomic.
//!
//! # Backends
//!
//! - [`postgres::PgStore`]: PostgreSQL via sqlx (production)
//! - [`memory::MemoryStore`]: in-process maps (tests and local runs)
//!
//! # Ordering guarantees
//!
//! - `lists_for_board`: `order` ascending
//! - `tasks_for_list`: `order` ascending, ties by last write (older first)
//! - `activities_for_board`: newest first
//!
//! # Example
//!
//! ```
//! use kanban_shared::store::{memory::MemoryStore, Store};
//! use kanban_shared::models::user::User;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//! let user = User::new("Ada", "ada@example.com");
//! store.insert_user(&user).await?;
//!
//! let found = store.find_user_by_email("ada@example.com").await?;
//! assert_eq!(found.map(|u| u.id), Some(user.id));
//! # Ok(())
//! # }
//! ```

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{activity::Activity, board::Board, list::List, task::Task, user::User};

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be decoded into a record
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// The backend refused the write
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Storage result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage backend for boards, lists, tasks, users, and activities
///
/// `update_*` and `delete_*` return `false` when the target row does not
/// exist (for example, it was deleted by a concurrent request).
#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name for health reporting
    fn backend(&self) -> &'static str;

    /// Verifies the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    // Users

    async fn insert_user(&self, user: &User) -> StoreResult<()>;

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    // Boards

    async fn insert_board(&self, board: &Board) -> StoreResult<()>;

    async fn find_board(&self, id: Uuid) -> StoreResult<Option<Board>>;

    /// Boards where `user_id` is owner or member, oldest first
    async fn boards_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Board>>;

    async fn update_board(&self, board: &Board) -> StoreResult<bool>;

    /// Deletes a board with its lists, tasks, and activities
    async fn delete_board(&self, id: Uuid) -> StoreResult<bool>;

    // Lists

    async fn insert_list(&self, list: &List) -> StoreResult<()>;

    async fn find_list(&self, id: Uuid) -> StoreResult<Option<List>>;

    async fn lists_for_board(&self, board_id: Uuid) -> StoreResult<Vec<List>>;

    /// Highest `order` among the board's lists, `None` if it has none
    async fn max_list_order(&self, board_id: Uuid) -> StoreResult<Option<i64>>;

    async fn update_list(&self, list: &List) -> StoreResult<bool>;

    /// Deletes a list with its tasks and the activities scoped to it
    async fn delete_list(&self, id: Uuid) -> StoreResult<bool>;

    // Tasks

    async fn insert_task(&self, task: &Task) -> StoreResult<()>;

    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>>;

    async fn tasks_for_list(&self, list_id: Uuid) -> StoreResult<Vec<Task>>;

    /// Highest `order` among the list's tasks, `None` if it has none
    async fn max_task_order(&self, list_id: Uuid) -> StoreResult<Option<i64>>;

    async fn update_task(&self, task: &Task) -> StoreResult<bool>;

    async fn delete_task(&self, id: Uuid) -> StoreResult<bool>;

    // Activities

    /// Appends activities; all or nothing
    async fn insert_activities(&self, activities: &[Activity]) -> StoreResult<()>;

    /// Most recent activities of a board, newest first
    async fn activities_for_board(&self, board_id: Uuid, limit: usize) -> StoreResult<Vec<Activity>>;
}
