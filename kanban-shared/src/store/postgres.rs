//! PostgreSQL store
//!
//! Row structs mirror the tables created by the embedded migrations and are
//! converted into the plain records from [`crate::models`]. Enum columns are
//! stored as text and parsed on the way out; a value that does not parse is
//! reported as [`StoreError::Corrupt`].
//!
//! # Example
//!
//! ```no_run
//! use kanban_shared::db::pool::{create_pool, DatabaseConfig};
//! use kanban_shared::store::{postgres::PgStore, Store};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig::default()).await?;
//! let store = PgStore::new(pool);
//! store.ping().await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::db::pool::health_check;
use crate::models::{
    activity::Activity,
    board::Board,
    list::List,
    task::{Label, Task},
    user::User,
};

const USER_COLUMNS: &str = "id, name, email, avatar_url, created_at";
const BOARD_COLUMNS: &str = "id, title, description, owner_id, members, created_at, updated_at";
const LIST_COLUMNS: &str = r#"id, title, board_id, "order", created_at, updated_at"#;
const TASK_COLUMNS: &str = r#"id, title, description, list_id, board_id, "order", due_date, labels,
       assigned_to, created_by, completed, created_at, updated_at"#;
const ACTIVITY_COLUMNS: &str =
    "id, text, entity_type, action_type, board_id, list_id, task_id, user_id, created_at";

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            avatar_url: row.avatar_url,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BoardRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    owner_id: Uuid,
    members: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BoardRow> for Board {
    fn from(row: BoardRow) -> Self {
        Board {
            id: row.id,
            title: row.title,
            description: row.description,
            owner_id: row.owner_id,
            members: row.members,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ListRow {
    id: Uuid,
    title: String,
    board_id: Uuid,
    order: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ListRow> for List {
    fn from(row: ListRow) -> Self {
        List {
            id: row.id,
            title: row.title,
            board_id: row.board_id,
            order: row.order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    description: String,
    list_id: Uuid,
    board_id: Uuid,
    order: i64,
    due_date: Option<DateTime<Utc>>,
    labels: Json<Vec<Label>>,
    assigned_to: Vec<Uuid>,
    created_by: Uuid,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            title: row.title,
            description: row.description,
            list_id: row.list_id,
            board_id: row.board_id,
            order: row.order,
            due_date: row.due_date,
            labels: row.labels.0,
            assigned_to: row.assigned_to,
            created_by: row.created_by,
            completed: row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ActivityRow {
    id: Uuid,
    text: String,
    entity_type: String,
    action_type: String,
    board_id: Uuid,
    list_id: Option<Uuid>,
    task_id: Option<Uuid>,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<ActivityRow> for Activity {
    type Error = StoreError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        Ok(Activity {
            id: row.id,
            text: row.text,
            entity_type: row.entity_type.parse().map_err(StoreError::Corrupt)?,
            action_type: row.action_type.parse().map_err(StoreError::Corrupt)?,
            board_id: row.board_id,
            list_id: row.list_id,
            task_id: row.task_id,
            user_id: row.user_id,
            created_at: row.created_at,
        })
    }
}

/// PostgreSQL-backed [`Store`]
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        health_check(&self.pool).await?;
        Ok(())
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, avatar_url, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.avatar_url)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn insert_board(&self, board: &Board) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO boards (id, title, description, owner_id, members, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(board.id)
        .bind(&board.title)
        .bind(&board.description)
        .bind(board.owner_id)
        .bind(&board.members)
        .bind(board.created_at)
        .bind(board.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_board(&self, id: Uuid) -> StoreResult<Option<Board>> {
        let row = sqlx::query_as::<_, BoardRow>(&format!(
            "SELECT {} FROM boards WHERE id = $1",
            BOARD_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Board::from))
    }

    async fn boards_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Board>> {
        let rows = sqlx::query_as::<_, BoardRow>(&format!(
            "SELECT {} FROM boards WHERE owner_id = $1 OR $1 = ANY(members) ORDER BY created_at ASC",
            BOARD_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Board::from).collect())
    }

    async fn update_board(&self, board: &Board) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE boards
            SET title = $2, description = $3, members = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(board.id)
        .bind(&board.title)
        .bind(&board.description)
        .bind(&board.members)
        .bind(board.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_board(&self, id: Uuid) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM activities WHERE board_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM tasks WHERE board_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM lists WHERE board_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_list(&self, list: &List) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO lists (id, title, board_id, "order", created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(list.id)
        .bind(&list.title)
        .bind(list.board_id)
        .bind(list.order)
        .bind(list.created_at)
        .bind(list.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_list(&self, id: Uuid) -> StoreResult<Option<List>> {
        let row = sqlx::query_as::<_, ListRow>(&format!(
            "SELECT {} FROM lists WHERE id = $1",
            LIST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(List::from))
    }

    async fn lists_for_board(&self, board_id: Uuid) -> StoreResult<Vec<List>> {
        let rows = sqlx::query_as::<_, ListRow>(&format!(
            r#"SELECT {} FROM lists WHERE board_id = $1 ORDER BY "order" ASC, updated_at ASC"#,
            LIST_COLUMNS
        ))
        .bind(board_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(List::from).collect())
    }

    async fn max_list_order(&self, board_id: Uuid) -> StoreResult<Option<i64>> {
        let max: Option<i64> =
            sqlx::query_scalar(r#"SELECT MAX("order") FROM lists WHERE board_id = $1"#)
                .bind(board_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(max)
    }

    async fn update_list(&self, list: &List) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE lists
            SET title = $2, "order" = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(list.id)
        .bind(&list.title)
        .bind(list.order)
        .bind(list.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_list(&self, id: Uuid) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM activities WHERE list_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM tasks WHERE list_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_task(&self, task: &Task) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, title, description, list_id, board_id, "order", due_date,
                               labels, assigned_to, created_by, completed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.list_id)
        .bind(task.board_id)
        .bind(task.order)
        .bind(task.due_date)
        .bind(Json(&task.labels))
        .bind(&task.assigned_to)
        .bind(task.created_by)
        .bind(task.completed)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Task::from))
    }

    async fn tasks_for_list(&self, list_id: Uuid) -> StoreResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            r#"SELECT {} FROM tasks WHERE list_id = $1 ORDER BY "order" ASC, updated_at ASC"#,
            TASK_COLUMNS
        ))
        .bind(list_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn max_task_order(&self, list_id: Uuid) -> StoreResult<Option<i64>> {
        let max: Option<i64> =
            sqlx::query_scalar(r#"SELECT MAX("order") FROM tasks WHERE list_id = $1"#)
                .bind(list_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(max)
    }

    async fn update_task(&self, task: &Task) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, list_id = $4, board_id = $5, "order" = $6,
                due_date = $7, labels = $8, assigned_to = $9, completed = $10, updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.list_id)
        .bind(task.board_id)
        .bind(task.order)
        .bind(task.due_date)
        .bind(Json(&task.labels))
        .bind(&task.assigned_to)
        .bind(task.completed)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_task(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_activities(&self, activities: &[Activity]) -> StoreResult<()> {
        if activities.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        for activity in activities {
            sqlx::query(
                r#"
                INSERT INTO activities (id, text, entity_type, action_type, board_id, list_id,
                                        task_id, user_id, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(activity.id)
            .bind(&activity.text)
            .bind(activity.entity_type.as_str())
            .bind(activity.action_type.as_str())
            .bind(activity.board_id)
            .bind(activity.list_id)
            .bind(activity.task_id)
            .bind(activity.user_id)
            .bind(activity.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn activities_for_board(&self, board_id: Uuid, limit: usize) -> StoreResult<Vec<Activity>> {
        let rows = sqlx::query_as::<_, ActivityRow>(&format!(
            "SELECT {} FROM activities WHERE board_id = $1 ORDER BY created_at DESC LIMIT $2",
            ACTIVITY_COLUMNS
        ))
        .bind(board_id)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Activity::try_from).collect()
    }
}
