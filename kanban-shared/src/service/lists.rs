//! Lists and batch reordering

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::models::list::{CreateList, List, ReorderLists, UpdateList};

use super::activity::{record, ActivityKind, Scope};
use super::ordering::next_order;
use super::{KanbanService, ServiceError, ServiceResult};

impl KanbanService {
    /// Lists of a board, ascending by order
    pub async fn lists_for_board(&self, actor: Uuid, board_id: Uuid) -> ServiceResult<Vec<List>> {
        self.guard(board_id, actor).await?;
        Ok(self.store.lists_for_board(board_id).await?)
    }

    /// Appends a list at the end of the board
    pub async fn create_list(
        &self,
        actor: Uuid,
        board_id: Uuid,
        data: CreateList,
    ) -> ServiceResult<List> {
        self.guard(board_id, actor).await?;

        let order = next_order(self.store.max_list_order(board_id).await?);
        let list = List::new(board_id, &data.title, order);
        list.validate()?;

        self.store.insert_list(&list).await?;
        tracing::debug!(list_id = %list.id, %board_id, order, "List created");

        record(
            self.store(),
            actor,
            ActivityKind::ListCreated {
                title: list.title.clone(),
            },
            Scope::list(board_id, list.id),
        )
        .await;

        Ok(list)
    }

    /// Renames and/or re-ranks a list
    pub async fn update_list(
        &self,
        actor: Uuid,
        list_id: Uuid,
        data: UpdateList,
    ) -> ServiceResult<List> {
        let mut list = self.load_list(list_id).await?;
        self.guard(list.board_id, actor).await?;
        let before = list.clone();

        if let Some(title) = data.title {
            list.title = title.trim().to_string();
        }
        if let Some(order) = data.order {
            list.order = order;
        }
        list.validate()?;

        let renamed = list.title != before.title;
        if !renamed && list.order == before.order {
            return Ok(list);
        }

        list.updated_at = Utc::now();
        if !self.store.update_list(&list).await? {
            return Err(ServiceError::not_found("List", list_id));
        }

        let kind = if renamed {
            ActivityKind::ListRenamed {
                from: before.title,
                to: list.title.clone(),
            }
        } else {
            ActivityKind::ListMoved {
                title: list.title.clone(),
            }
        };
        record(self.store(), actor, kind, Scope::list(list.board_id, list.id)).await;

        Ok(list)
    }

    /// Deletes a list with its tasks
    pub async fn delete_list(&self, actor: Uuid, list_id: Uuid) -> ServiceResult<()> {
        let list = self.load_list(list_id).await?;
        self.guard(list.board_id, actor).await?;

        if !self.store.delete_list(list_id).await? {
            return Err(ServiceError::not_found("List", list_id));
        }
        tracing::info!(%list_id, board_id = %list.board_id, "List deleted");

        // Scoped to the board only; the list's own activities are gone.
        record(
            self.store(),
            actor,
            ActivityKind::ListDeleted { title: list.title },
            Scope::board(list.board_id),
        )
        .await;

        Ok(())
    }

    /// Applies `{id, order}` pairs one at a time
    ///
    /// There is no transaction around the batch: a pair naming a missing or
    /// foreign list stops it with `InvalidOperation`, and the pairs before
    /// it stay applied. The set is not checked for being a permutation.
    pub async fn reorder_lists(
        &self,
        actor: Uuid,
        board_id: Uuid,
        data: ReorderLists,
    ) -> ServiceResult<Vec<List>> {
        self.guard(board_id, actor).await?;

        if data.lists.is_empty() {
            return Err(ServiceError::invalid("Please provide a lists array"));
        }

        for (applied, pair) in data.lists.iter().enumerate() {
            let mut list = match self.store.find_list(pair.id).await? {
                Some(list) if list.board_id == board_id => list,
                _ => {
                    tracing::warn!(%board_id, list_id = %pair.id, applied, "Reorder stopped");
                    return Err(ServiceError::invalid(format!(
                        "List {} does not belong to board {}",
                        pair.id, board_id
                    )));
                }
            };

            if list.order != pair.order {
                list.order = pair.order;
                list.updated_at = Utc::now();
                self.store.update_list(&list).await?;
            }
        }

        record(
            self.store(),
            actor,
            ActivityKind::ListsReordered,
            Scope::board(board_id),
        )
        .await;

        Ok(self.store.lists_for_board(board_id).await?)
    }
}
