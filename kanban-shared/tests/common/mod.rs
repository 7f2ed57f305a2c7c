//! Seed fixture shared by the service tests
//!
//! One owner, one invited member, one outsider, and a board with two lists
//! ("Todo" at order 0, "Done" at order 1). Built fresh per test over its own
//! `MemoryStore`.

#![allow(dead_code)]

use std::sync::Arc;

use kanban_shared::models::board::{AddMember, Board, CreateBoard};
use kanban_shared::models::list::{CreateList, List};
use kanban_shared::models::task::{CreateTask, Task};
use kanban_shared::models::user::User;
use kanban_shared::service::KanbanService;
use kanban_shared::store::memory::MemoryStore;
use kanban_shared::store::Store;

pub struct Seed {
    pub store: Arc<MemoryStore>,
    pub service: KanbanService,
    pub owner: User,
    pub member: User,
    pub outsider: User,
    pub board: Board,
    pub todo: List,
    pub done: List,
}

impl Seed {
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let service = KanbanService::new(store.clone());

        let owner = User::new("Olivia Owner", "olivia@example.com");
        let member = User::new("Max Member", "max@example.com");
        let outsider = User::new("Oscar Outsider", "oscar@example.com");
        for user in [&owner, &member, &outsider] {
            store.insert_user(user).await.unwrap();
        }

        let board = service
            .create_board(
                owner.id,
                CreateBoard {
                    title: "Product Launch".to_string(),
                    description: Some("Everything for the v1 launch".to_string()),
                },
            )
            .await
            .unwrap();

        let board = service
            .add_member(
                owner.id,
                board.id,
                AddMember {
                    email: Some(member.email.clone()),
                },
            )
            .await
            .unwrap();

        let todo = service
            .create_list(owner.id, board.id, CreateList { title: "Todo".to_string() })
            .await
            .unwrap();
        let done = service
            .create_list(owner.id, board.id, CreateList { title: "Done".to_string() })
            .await
            .unwrap();

        Self {
            store,
            service,
            owner,
            member,
            outsider,
            board,
            todo,
            done,
        }
    }

    /// Creates a task in `list` as the owner
    pub async fn task(&self, list: &List, title: &str) -> Task {
        self.service
            .create_task(self.owner.id, list.id, new_task(title))
            .await
            .unwrap()
    }

    /// Activity count for the seeded board
    pub async fn activity_count(&self) -> usize {
        self.store
            .activities_for_board(self.board.id, 1000)
            .await
            .unwrap()
            .len()
    }
}

pub fn new_task(title: &str) -> CreateTask {
    CreateTask {
        title: title.to_string(),
        description: None,
        due_date: None,
        labels: vec![],
    }
}
