//! Tasks: CRUD, moves and assignment

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::models::task::{normalize_labels, AssignUser, CreateTask, MoveTask, Task, UpdateTask};

use super::activity::{record, ActivityKind, ActivityLog, Scope};
use super::ordering::{apply_move, check_same_board, next_order};
use super::{KanbanService, ServiceError, ServiceResult};

impl KanbanService {
    /// Tasks of a list, ascending by order
    pub async fn tasks_for_list(&self, actor: Uuid, list_id: Uuid) -> ServiceResult<Vec<Task>> {
        let list = self.load_list(list_id).await?;
        self.guard(list.board_id, actor).await?;

        Ok(self.store.tasks_for_list(list_id).await?)
    }

    /// Reads one task
    pub async fn get_task(&self, actor: Uuid, task_id: Uuid) -> ServiceResult<Task> {
        let task = self.load_task(task_id).await?;
        self.guard(task.board_id, actor).await?;
        Ok(task)
    }

    /// Appends a task at the end of a list
    ///
    /// The new order is one past the current maximum in the list, or `0`
    /// for an empty list.
    pub async fn create_task(
        &self,
        actor: Uuid,
        list_id: Uuid,
        data: CreateTask,
    ) -> ServiceResult<Task> {
        let list = self.load_list(list_id).await?;
        self.guard(list.board_id, actor).await?;

        let order = next_order(self.store.max_task_order(list_id).await?);
        let task = Task::new(&list, actor, order, data);
        task.validate()?;

        self.store.insert_task(&task).await?;
        tracing::info!(task_id = %task.id, %list_id, order, "Task created");

        record(
            self.store(),
            actor,
            ActivityKind::TaskCreated {
                title: task.title.clone(),
                list: list.title,
            },
            Scope::task(task.board_id, task.list_id, task.id),
        )
        .await;

        Ok(task)
    }

    /// Applies any subset of title, description, due date, labels and completion
    ///
    /// Produces up to three activities: a rename, a completion toggle, and
    /// one entry covering description, due date and label edits. Fields that
    /// end up equal to their previous value produce nothing.
    pub async fn update_task(
        &self,
        actor: Uuid,
        task_id: Uuid,
        data: UpdateTask,
    ) -> ServiceResult<Task> {
        let mut task = self.load_task(task_id).await?;
        self.guard(task.board_id, actor).await?;
        let before = task.clone();

        if let Some(title) = data.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = data.description {
            task.description = description.trim().to_string();
        }
        if let Some(due_date) = data.due_date {
            task.due_date = due_date;
        }
        if let Some(labels) = data.labels {
            task.labels = normalize_labels(labels);
        }
        if let Some(completed) = data.completed {
            task.completed = completed;
        }
        task.validate()?;

        if task == before {
            return Ok(task);
        }

        task.updated_at = Utc::now();
        if !self.store.update_task(&task).await? {
            return Err(ServiceError::not_found("Task", task_id));
        }

        let scope = Scope::task(task.board_id, task.list_id, task.id);
        let mut log = ActivityLog::new(actor);

        if task.title != before.title {
            log.push(
                ActivityKind::TaskRenamed {
                    from: before.title.clone(),
                    to: task.title.clone(),
                },
                scope,
            );
        }
        if task.completed != before.completed {
            log.push(
                ActivityKind::TaskCompletion {
                    title: task.title.clone(),
                    completed: task.completed,
                },
                scope,
            );
        }
        if task.description != before.description
            || task.due_date != before.due_date
            || task.labels != before.labels
        {
            log.push(
                ActivityKind::TaskEdited {
                    title: task.title.clone(),
                },
                scope,
            );
        }
        log.commit(self.store()).await;

        Ok(task)
    }

    /// Deletes a task
    pub async fn delete_task(&self, actor: Uuid, task_id: Uuid) -> ServiceResult<()> {
        let task = self.load_task(task_id).await?;
        self.guard(task.board_id, actor).await?;

        if !self.store.delete_task(task_id).await? {
            return Err(ServiceError::not_found("Task", task_id));
        }
        tracing::info!(%task_id, list_id = %task.list_id, "Task deleted");

        record(
            self.store(),
            actor,
            ActivityKind::TaskDeleted { title: task.title },
            Scope::list(task.board_id, task.list_id),
        )
        .await;

        Ok(())
    }

    /// Moves a task to `data.list_id` at `data.order`
    ///
    /// The order is written verbatim and siblings are not renumbered. The
    /// destination must be on the task's board. A move activity is recorded
    /// only when the list changes.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the task or the destination list is missing
    /// - `Forbidden` when the actor has no access to the task's board
    /// - `InvalidOperation` when the destination is on another board
    pub async fn move_task(
        &self,
        actor: Uuid,
        task_id: Uuid,
        data: MoveTask,
    ) -> ServiceResult<Task> {
        let mut task = self.load_task(task_id).await?;
        self.guard(task.board_id, actor).await?;

        let destination = self.load_list(data.list_id).await?;
        check_same_board(&task, &destination)?;

        let source_list_id = task.list_id;
        if source_list_id == destination.id && task.order == data.order {
            return Ok(task);
        }

        // Title captured before the write for the activity text.
        let source_title = match self.store.find_list(source_list_id).await? {
            Some(list) => list.title,
            None => source_list_id.to_string(),
        };

        apply_move(&mut task, &destination, data.order);
        task.updated_at = Utc::now();
        if !self.store.update_task(&task).await? {
            return Err(ServiceError::not_found("Task", task_id));
        }

        tracing::debug!(
            %task_id,
            from = %source_list_id,
            to = %destination.id,
            order = data.order,
            "Task moved"
        );

        if source_list_id != destination.id {
            record(
                self.store(),
                actor,
                ActivityKind::TaskMoved {
                    title: task.title.clone(),
                    from: source_title,
                    to: destination.title,
                },
                Scope::task(task.board_id, destination.id, task.id),
            )
            .await;
        }

        Ok(task)
    }

    /// Adds a board member to a task's assignees
    ///
    /// # Errors
    ///
    /// `InvalidOperation` when the user has no access to the board or is
    /// already assigned.
    pub async fn assign_user(
        &self,
        actor: Uuid,
        task_id: Uuid,
        data: AssignUser,
    ) -> ServiceResult<Task> {
        let mut task = self.load_task(task_id).await?;
        let board = self.guard(task.board_id, actor).await?;

        if !board.has_access(data.user_id) {
            return Err(ServiceError::invalid("User is not a member of this board"));
        }
        if task.is_assigned(data.user_id) {
            return Err(ServiceError::invalid("User is already assigned to this task"));
        }

        task.assigned_to.push(data.user_id);
        task.updated_at = Utc::now();
        self.store.update_task(&task).await?;

        let name = self.display_name(data.user_id).await;
        record(
            self.store(),
            actor,
            ActivityKind::UserAssigned {
                name,
                task: task.title.clone(),
            },
            Scope::task(task.board_id, task.list_id, task.id),
        )
        .await;

        Ok(task)
    }

    /// Removes a user from a task's assignees
    ///
    /// Removing someone who is not assigned succeeds without changing
    /// anything.
    pub async fn unassign_user(
        &self,
        actor: Uuid,
        task_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<Task> {
        let mut task = self.load_task(task_id).await?;
        self.guard(task.board_id, actor).await?;

        if !task.is_assigned(user_id) {
            return Ok(task);
        }

        task.assigned_to.retain(|u| *u != user_id);
        task.updated_at = Utc::now();
        self.store.update_task(&task).await?;

        let name = self.display_name(user_id).await;
        record(
            self.store(),
            actor,
            ActivityKind::UserUnassigned {
                name,
                task: task.title.clone(),
            },
            Scope::task(task.board_id, task.list_id, task.id),
        )
        .await;

        Ok(task)
    }
}
