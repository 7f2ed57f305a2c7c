//! Board membership guard
//!
//! A user may touch a board, and every list, task and activity under it,
//! when they are the board's owner or appear in its member list. Ownership
//! alone unlocks board edits, deletion and member management.
//!
//! Membership is never cached: [`require_board_access`] re-reads the board
//! on every call so a removed member loses access on their next request.
//!
//! # Example
//!
//! ```
//! use kanban_shared::auth::authorization::{check_access, AuthzError};
//! use kanban_shared::models::board::{Board, CreateBoard};
//! use uuid::Uuid;
//!
//! let owner = Uuid::new_v4();
//! let board = Board::new(owner, CreateBoard { title: "Roadmap".into(), description: None });
//!
//! assert!(check_access(&board, owner).is_ok());
//! assert!(matches!(
//!     check_access(&board, Uuid::new_v4()),
//!     Err(AuthzError::NotMember { .. })
//! ));
//! ```

use uuid::Uuid;

use crate::models::board::Board;
use crate::store::{Store, StoreError};

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Board does not exist
    #[error("Board {0} not found")]
    BoardNotFound(Uuid),

    /// User is neither owner nor member
    #[error("Not authorized to access board {board_id}")]
    NotMember { board_id: Uuid, user_id: Uuid },

    /// Operation requires the board owner
    #[error("Only the board owner can perform this action on board {board_id}")]
    NotOwner { board_id: Uuid, user_id: Uuid },

    /// Storage error while loading the board
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Checks that `user_id` is the owner or a member of `board`
pub fn check_access(board: &Board, user_id: Uuid) -> Result<(), AuthzError> {
    if board.has_access(user_id) {
        Ok(())
    } else {
        Err(AuthzError::NotMember {
            board_id: board.id,
            user_id,
        })
    }
}

/// Checks that `user_id` owns `board`
pub fn check_owner(board: &Board, user_id: Uuid) -> Result<(), AuthzError> {
    if board.is_owner(user_id) {
        Ok(())
    } else {
        Err(AuthzError::NotOwner {
            board_id: board.id,
            user_id,
        })
    }
}

/// Loads a board and requires the user to be its owner or a member
///
/// # Errors
///
/// - [`AuthzError::BoardNotFound`] if the board does not exist
/// - [`AuthzError::NotMember`] if the user has no access
/// - [`AuthzError::Store`] on storage failure
pub async fn require_board_access(
    store: &dyn Store,
    board_id: Uuid,
    user_id: Uuid,
) -> Result<Board, AuthzError> {
    let board = store
        .find_board(board_id)
        .await?
        .ok_or(AuthzError::BoardNotFound(board_id))?;

    if let Err(e) = check_access(&board, user_id) {
        tracing::debug!(%board_id, %user_id, "Board access denied");
        return Err(e);
    }

    Ok(board)
}

/// Loads a board and requires the user to own it
///
/// # Errors
///
/// - [`AuthzError::BoardNotFound`] if the board does not exist
/// - [`AuthzError::NotOwner`] if the user is not the owner
/// - [`AuthzError::Store`] on storage failure
pub async fn require_board_owner(
    store: &dyn Store,
    board_id: Uuid,
    user_id: Uuid,
) -> Result<Board, AuthzError> {
    let board = store
        .find_board(board_id)
        .await?
        .ok_or(AuthzError::BoardNotFound(board_id))?;

    if let Err(e) = check_owner(&board, user_id) {
        tracing::debug!(%board_id, %user_id, "Board ownership required");
        return Err(e);
    }

    Ok(board)
}
