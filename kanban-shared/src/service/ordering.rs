//! Ordering engine
//!
//! `order` is a sort key, not a dense rank. New lists and tasks are appended
//! at `max + 1` (or `0` in an empty container); moves write the
//! caller-supplied order verbatim and never renumber siblings. Readers sort
//! ascending by `order`, ties broken by write order.
//!
//! The append is read-then-write with no lock around it; two concurrent
//! appends into the same list may end up with the same order value.

use crate::models::list::List;
use crate::models::task::Task;

use super::error::{ServiceError, ServiceResult};

/// Order for an item appended after `max`
///
/// ```
/// use kanban_shared::service::ordering::next_order;
///
/// assert_eq!(next_order(None), 0);
/// assert_eq!(next_order(Some(4)), 5);
/// assert_eq!(next_order(Some(-3)), -2);
/// ```
pub fn next_order(max: Option<i64>) -> i64 {
    max.map_or(0, |m| m.saturating_add(1))
}

/// Rejects a move whose destination list is on another board
///
/// The task's cached board is compared with the destination list's board,
/// which is the value it will be recomputed from after the move.
pub fn check_same_board(task: &Task, destination: &List) -> ServiceResult<()> {
    if task.board_id != destination.board_id {
        return Err(ServiceError::invalid(
            "Cannot move task to a list in a different board",
        ));
    }
    Ok(())
}

/// Applies a move in place: destination list, its board, and the supplied order
pub fn apply_move(task: &mut Task, destination: &List, order: i64) {
    task.list_id = destination.id;
    task.board_id = destination.board_id;
    task.order = order;
}
