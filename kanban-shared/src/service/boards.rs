//! Boards, membership and the activity feed

use chrono::Utc;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::auth::authorization::require_board_owner;
use crate::models::activity::Activity;
use crate::models::board::{AddMember, Board, CreateBoard, UpdateBoard};

use super::activity::{record, ActivityKind, Scope};
use super::{KanbanService, ServiceError, ServiceResult};

/// Largest activity page a caller may request
pub const MAX_FEED_LIMIT: usize = 200;

/// Clamps a requested feed size to `1..=MAX_FEED_LIMIT`
///
/// ```
/// use kanban_shared::service::clamp_feed_limit;
///
/// assert_eq!(clamp_feed_limit(0), 1);
/// assert_eq!(clamp_feed_limit(50), 50);
/// assert_eq!(clamp_feed_limit(10_000), 200);
/// ```
pub fn clamp_feed_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_FEED_LIMIT)
}

fn required(field: &'static str, message: &'static str) -> ValidationErrors {
    let mut error = ValidationError::new("required");
    error.message = Some(message.into());

    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    errors
}

impl KanbanService {
    /// Creates a board owned by `actor`
    pub async fn create_board(&self, actor: Uuid, data: CreateBoard) -> ServiceResult<Board> {
        let board = Board::new(actor, data);
        board.validate()?;

        self.store.insert_board(&board).await?;
        tracing::info!(board_id = %board.id, user_id = %actor, "Board created");

        record(
            self.store(),
            actor,
            ActivityKind::BoardCreated,
            Scope::board(board.id),
        )
        .await;

        Ok(board)
    }

    /// Boards `actor` owns or is a member of
    pub async fn list_boards(&self, actor: Uuid) -> ServiceResult<Vec<Board>> {
        Ok(self.store.boards_for_user(actor).await?)
    }

    /// Reads one board
    pub async fn get_board(&self, actor: Uuid, board_id: Uuid) -> ServiceResult<Board> {
        self.guard(board_id, actor).await
    }

    /// Updates title and/or description (owner only)
    ///
    /// An activity is recorded only when a field actually changed.
    pub async fn update_board(
        &self,
        actor: Uuid,
        board_id: Uuid,
        data: UpdateBoard,
    ) -> ServiceResult<Board> {
        let mut board = require_board_owner(self.store(), board_id, actor).await?;
        let before = board.clone();

        if let Some(title) = data.title {
            board.title = title.trim().to_string();
        }
        if let Some(description) = data.description {
            board.description = description.map(|d| d.trim().to_string());
        }
        board.validate()?;

        if board.title == before.title && board.description == before.description {
            return Ok(board);
        }

        board.updated_at = Utc::now();
        if !self.store.update_board(&board).await? {
            return Err(ServiceError::not_found("Board", board_id));
        }

        record(
            self.store(),
            actor,
            ActivityKind::BoardUpdated,
            Scope::board(board.id),
        )
        .await;

        Ok(board)
    }

    /// Deletes a board with its lists, tasks and activities (owner only)
    pub async fn delete_board(&self, actor: Uuid, board_id: Uuid) -> ServiceResult<()> {
        require_board_owner(self.store(), board_id, actor).await?;

        if !self.store.delete_board(board_id).await? {
            return Err(ServiceError::not_found("Board", board_id));
        }

        tracing::info!(%board_id, user_id = %actor, "Board deleted");
        Ok(())
    }

    /// Invites an existing user, looked up by email (owner only)
    ///
    /// # Errors
    ///
    /// - `Validation` when no email is given
    /// - `NotFound` when no user has that email
    /// - `InvalidOperation` when the user already has access
    pub async fn add_member(
        &self,
        actor: Uuid,
        board_id: Uuid,
        data: AddMember,
    ) -> ServiceResult<Board> {
        let mut board = require_board_owner(self.store(), board_id, actor).await?;

        let email = data
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| required("email", "Please provide an email"))?;

        let user = self
            .store
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::NotFound {
                entity: "User",
                id: email.to_string(),
            })?;

        if board.is_owner(user.id) {
            return Err(ServiceError::invalid("User is the owner of this board"));
        }
        if board.is_member(user.id) {
            return Err(ServiceError::invalid("User is already a member of this board"));
        }

        board.members.push(user.id);
        board.updated_at = Utc::now();
        self.store.update_board(&board).await?;

        tracing::info!(%board_id, member_id = %user.id, "Member added");
        record(
            self.store(),
            actor,
            ActivityKind::MemberAdded { name: user.name },
            Scope::board(board.id),
        )
        .await;

        Ok(board)
    }

    /// Revokes a member's access (owner only)
    ///
    /// The user is also unassigned from every task on the board. Removing a
    /// user who is not a member leaves the board unchanged and records nothing.
    pub async fn remove_member(
        &self,
        actor: Uuid,
        board_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<Board> {
        let mut board = require_board_owner(self.store(), board_id, actor).await?;

        let user = self
            .store
            .find_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        if !board.is_member(user.id) {
            return Ok(board);
        }

        board.members.retain(|m| *m != user.id);
        board.updated_at = Utc::now();
        self.store.update_board(&board).await?;
        self.unassign_everywhere(board_id, user.id).await?;

        tracing::info!(%board_id, member_id = %user.id, "Member removed");
        record(
            self.store(),
            actor,
            ActivityKind::MemberRemoved { name: user.name },
            Scope::board(board.id),
        )
        .await;

        Ok(board)
    }

    async fn unassign_everywhere(&self, board_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        for list in self.store.lists_for_board(board_id).await? {
            for mut task in self.store.tasks_for_list(list.id).await? {
                if task.is_assigned(user_id) {
                    task.assigned_to.retain(|u| *u != user_id);
                    task.updated_at = Utc::now();
                    self.store.update_task(&task).await?;
                }
            }
        }
        Ok(())
    }

    /// Newest-first activity feed for a board
    ///
    /// `limit` is clamped with [`clamp_feed_limit`].
    pub async fn activities(
        &self,
        actor: Uuid,
        board_id: Uuid,
        limit: usize,
    ) -> ServiceResult<Vec<Activity>> {
        self.guard(board_id, actor).await?;

        Ok(self
            .store
            .activities_for_board(board_id, clamp_feed_limit(limit))
            .await?)
    }
}
