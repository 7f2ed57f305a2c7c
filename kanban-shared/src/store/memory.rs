//! In-memory store
//!
//! Keeps every record in hash maps behind a single [`tokio::sync::RwLock`].
//! Each call takes the lock once, so a single call is atomic but a sequence
//! of calls is not, which matches the PostgreSQL backend's behaviour.
//!
//! Intended for tests and local runs (`STORAGE_BACKEND=memory`). A store
//! always starts empty; fixtures belong to test code.
//!
//! # Failure injection
//!
//! [`MemoryStore::fail_activity_writes`] makes `insert_activities` fail, so
//! tests can exercise the "audit write failed after the mutation committed"
//! path. [`MemoryStore::fail_user_reads`] does the same for `find_user`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::{activity::Activity, board::Board, list::List, task::Task, user::User};

/// A record plus the write sequence number used to break `order` ties
#[derive(Debug, Clone)]
struct Versioned<T> {
    seq: u64,
    value: T,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    boards: HashMap<Uuid, Versioned<Board>>,
    lists: HashMap<Uuid, Versioned<List>>,
    tasks: HashMap<Uuid, Versioned<Task>>,
    activities: Vec<Activity>,
    seq: u64,
}

impl MemoryState {
    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }
}

/// In-memory [`Store`] implementation
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    fail_activity_writes: AtomicBool,
    fail_user_reads: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent activity writes fail (or succeed again)
    pub fn fail_activity_writes(&self, fail: bool) {
        self.fail_activity_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent `find_user` calls fail (or succeed again)
    pub fn fail_user_reads(&self, fail: bool) {
        self.fail_user_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of stored activities across all boards
    pub async fn activity_count(&self) -> usize {
        self.state.read().await.activities.len()
    }
}

fn sorted_by_order<T, K: Ord>(
    entries: impl Iterator<Item = Versioned<T>>,
    key: impl Fn(&T) -> K,
) -> Vec<T> {
    let mut entries: Vec<Versioned<T>> = entries.collect();
    entries.sort_by(|a, b| key(&a.value).cmp(&key(&b.value)).then(a.seq.cmp(&b.seq)));
    entries.into_iter().map(|e| e.value).collect()
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        if self.fail_user_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("user reads are disabled".to_string()));
        }
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert_board(&self, board: &Board) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let seq = state.next_seq();
        state.boards.insert(
            board.id,
            Versioned {
                seq,
                value: board.clone(),
            },
        );
        Ok(())
    }

    async fn find_board(&self, id: Uuid) -> StoreResult<Option<Board>> {
        Ok(self.state.read().await.boards.get(&id).map(|e| e.value.clone()))
    }

    async fn boards_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Board>> {
        let state = self.state.read().await;
        let mut boards: Vec<&Versioned<Board>> = state
            .boards
            .values()
            .filter(|e| e.value.has_access(user_id))
            .collect();
        boards.sort_by(|a, b| {
            a.value
                .created_at
                .cmp(&b.value.created_at)
                .then(a.seq.cmp(&b.seq))
        });
        Ok(boards.into_iter().map(|e| e.value.clone()).collect())
    }

    async fn update_board(&self, board: &Board) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        match state.boards.get_mut(&board.id) {
            Some(entry) => {
                entry.value = board.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_board(&self, id: Uuid) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        if state.boards.remove(&id).is_none() {
            return Ok(false);
        }

        state.lists.retain(|_, e| e.value.board_id != id);
        state.tasks.retain(|_, e| e.value.board_id != id);
        state.activities.retain(|a| a.board_id != id);

        debug!(board_id = %id, "Deleted board with its lists, tasks, and activities");
        Ok(true)
    }

    async fn insert_list(&self, list: &List) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let seq = state.next_seq();
        state.lists.insert(
            list.id,
            Versioned {
                seq,
                value: list.clone(),
            },
        );
        Ok(())
    }

    async fn find_list(&self, id: Uuid) -> StoreResult<Option<List>> {
        Ok(self.state.read().await.lists.get(&id).map(|e| e.value.clone()))
    }

    async fn lists_for_board(&self, board_id: Uuid) -> StoreResult<Vec<List>> {
        let state = self.state.read().await;
        let lists = state
            .lists
            .values()
            .filter(|e| e.value.board_id == board_id)
            .cloned();
        Ok(sorted_by_order(lists, |l| l.order))
    }

    async fn max_list_order(&self, board_id: Uuid) -> StoreResult<Option<i64>> {
        let state = self.state.read().await;
        Ok(state
            .lists
            .values()
            .filter(|e| e.value.board_id == board_id)
            .map(|e| e.value.order)
            .max())
    }

    async fn update_list(&self, list: &List) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        if !state.lists.contains_key(&list.id) {
            return Ok(false);
        }
        let seq = state.next_seq();
        state.lists.insert(
            list.id,
            Versioned {
                seq,
                value: list.clone(),
            },
        );
        Ok(true)
    }

    async fn delete_list(&self, id: Uuid) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        if state.lists.remove(&id).is_none() {
            return Ok(false);
        }

        state.tasks.retain(|_, e| e.value.list_id != id);
        state.activities.retain(|a| a.list_id != Some(id));
        Ok(true)
    }

    async fn insert_task(&self, task: &Task) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let seq = state.next_seq();
        state.tasks.insert(
            task.id,
            Versioned {
                seq,
                value: task.clone(),
            },
        );
        Ok(())
    }

    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        Ok(self.state.read().await.tasks.get(&id).map(|e| e.value.clone()))
    }

    async fn tasks_for_list(&self, list_id: Uuid) -> StoreResult<Vec<Task>> {
        let state = self.state.read().await;
        let tasks = state
            .tasks
            .values()
            .filter(|e| e.value.list_id == list_id)
            .cloned();
        Ok(sorted_by_order(tasks, |t| t.order))
    }

    async fn max_task_order(&self, list_id: Uuid) -> StoreResult<Option<i64>> {
        let state = self.state.read().await;
        Ok(state
            .tasks
            .values()
            .filter(|e| e.value.list_id == list_id)
            .map(|e| e.value.order)
            .max())
    }

    async fn update_task(&self, task: &Task) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        if !state.tasks.contains_key(&task.id) {
            return Ok(false);
        }
        let seq = state.next_seq();
        state.tasks.insert(
            task.id,
            Versioned {
                seq,
                value: task.clone(),
            },
        );
        Ok(true)
    }

    async fn delete_task(&self, id: Uuid) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        Ok(state.tasks.remove(&id).is_some())
    }

    async fn insert_activities(&self, activities: &[Activity]) -> StoreResult<()> {
        if self.fail_activity_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "activity writes are disabled".to_string(),
            ));
        }

        let mut state = self.state.write().await;
        state.activities.extend_from_slice(activities);
        Ok(())
    }

    async fn activities_for_board(&self, board_id: Uuid, limit: usize) -> StoreResult<Vec<Activity>> {
        let state = self.state.read().await;
        Ok(state
            .activities
            .iter()
            .rev()
            .filter(|a| a.board_id == board_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::board::CreateBoard;
    use crate::models::task::CreateTask;

    fn board(owner: Uuid) -> Board {
        Board::new(
            owner,
            CreateBoard {
                title: "Board".to_string(),
                description: None,
            },
        )
    }

    fn task(list: &List, title: &str, order: i64) -> Task {
        Task::new(
            list,
            Uuid::new_v4(),
            order,
            CreateTask {
                title: title.to_string(),
                description: None,
                due_date: None,
                labels: Vec::new(),
            },
        )
    }

    #[tokio::test]
    async fn test_tasks_sorted_by_order_then_write_sequence() {
        let store = MemoryStore::new();
        let list = List::new(Uuid::new_v4(), "L", 0);

        let b = task(&list, "b", 1);
        let a = task(&list, "a", 0);
        let c = task(&list, "c", 1);
        store.insert_task(&b).await.unwrap();
        store.insert_task(&a).await.unwrap();
        store.insert_task(&c).await.unwrap();

        let titles: Vec<String> = store
            .tasks_for_list(list.id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert_eq!(store.max_task_order(list.id).await.unwrap(), Some(1));

        // A rewrite moves b behind its equal-order sibling.
        store.update_task(&b).await.unwrap();
        let titles: Vec<String> = store
            .tasks_for_list(list.id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["a", "c", "b"]);
    }

    #[tokio::test]
    async fn test_max_order_of_empty_list_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.max_task_order(Uuid::new_v4()).await.unwrap(), None);
        assert_eq!(store.max_list_order(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_missing_rows_returns_false() {
        let store = MemoryStore::new();
        let list = List::new(Uuid::new_v4(), "L", 0);

        assert!(!store.update_list(&list).await.unwrap());
        assert!(!store.update_task(&task(&list, "t", 0)).await.unwrap());
        assert!(!store.delete_board(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_list_cascades_to_tasks_and_scoped_activities() {
        let store = MemoryStore::new();
        let board = board(Uuid::new_v4());
        let list = List::new(board.id, "L", 0);
        let t = task(&list, "t", 0);
        store.insert_board(&board).await.unwrap();
        store.insert_list(&list).await.unwrap();
        store.insert_task(&t).await.unwrap();

        let scoped = Activity {
            id: Uuid::new_v4(),
            text: "added task".to_string(),
            entity_type: crate::models::activity::EntityType::Card,
            action_type: crate::models::activity::ActionType::Create,
            board_id: board.id,
            list_id: Some(list.id),
            task_id: Some(t.id),
            user_id: board.owner_id,
            created_at: chrono::Utc::now(),
        };
        let board_wide = Activity {
            id: Uuid::new_v4(),
            list_id: None,
            task_id: None,
            ..scoped.clone()
        };
        store
            .insert_activities(&[scoped, board_wide.clone()])
            .await
            .unwrap();

        assert!(store.delete_list(list.id).await.unwrap());
        assert!(store.find_task(t.id).await.unwrap().is_none());

        let remaining = store.activities_for_board(board.id, 10).await.unwrap();
        assert_eq!(remaining, vec![board_wide]);
    }

    #[tokio::test]
    async fn test_failing_activity_writes() {
        let store = MemoryStore::new();
        store.fail_activity_writes(true);
        assert!(store.insert_activities(&[]).await.is_err());

        store.fail_activity_writes(false);
        assert!(store.insert_activities(&[]).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_user_by_email_ignores_case() {
        let store = MemoryStore::new();
        let user = User::new("Grace", "Grace@Example.com");
        store.insert_user(&user).await.unwrap();

        let found = store.find_user_by_email("grace@example.com").await.unwrap();
        assert_eq!(found, Some(user));
    }
}
