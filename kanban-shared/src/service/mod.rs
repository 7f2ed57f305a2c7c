//! Board, list and task operations
//!
//! Each operation follows the same sequence: load the addressed entity
//! (`NotFound` if absent), pass the membership guard against its board,
//! validate and apply the mutation, store it, then record activities for
//! whatever observably changed.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use kanban_shared::models::board::CreateBoard;
//! use kanban_shared::models::list::CreateList;
//! use kanban_shared::service::KanbanService;
//! use kanban_shared::store::memory::MemoryStore;
//! use uuid::Uuid;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = KanbanService::new(Arc::new(MemoryStore::new()));
//! let owner = Uuid::new_v4();
//!
//! let board = service
//!     .create_board(owner, CreateBoard { title: "Launch".into(), description: None })
//!     .await?;
//! let todo = service
//!     .create_list(owner, board.id, CreateList { title: "Todo".into() })
//!     .await?;
//! assert_eq!(todo.order, 0);
//! # Ok(())
//! # }
//! ```

pub mod activity;
pub mod error;
pub mod ordering;

mod boards;
mod lists;
mod tasks;

use std::sync::Arc;

use uuid::Uuid;

use crate::auth::authorization::require_board_access;
use crate::models::board::Board;
use crate::models::list::List;
use crate::models::task::Task;
use crate::store::Store;

pub use boards::{clamp_feed_limit, MAX_FEED_LIMIT};
pub use error::{ServiceError, ServiceResult};

/// Entry point for every board, list and task operation
///
/// Cheap to clone; all state lives in the store.
#[derive(Clone)]
pub struct KanbanService {
    store: Arc<dyn Store>,
}

impl std::fmt::Debug for KanbanService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KanbanService")
            .field("backend", &self.store.backend())
            .finish()
    }
}

impl KanbanService {
    /// Creates a service over `store`
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Underlying store
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    async fn guard(&self, board_id: Uuid, actor: Uuid) -> ServiceResult<Board> {
        Ok(require_board_access(self.store(), board_id, actor).await?)
    }

    async fn load_list(&self, id: Uuid) -> ServiceResult<List> {
        self.store
            .find_list(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("List", id))
    }

    async fn load_task(&self, id: Uuid) -> ServiceResult<Task> {
        self.store
            .find_task(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Task", id))
    }

    /// Display name for activity text
    ///
    /// Falls back to `"a user"` when the user is unknown or the lookup
    /// fails, so a read error never fails a mutation that already committed.
    async fn display_name(&self, user_id: Uuid) -> String {
        match self.store.find_user(user_id).await {
            Ok(Some(user)) => user.name,
            Ok(None) => "a user".to_string(),
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to resolve user name for activity");
                "a user".to_string()
            }
        }
    }
}
