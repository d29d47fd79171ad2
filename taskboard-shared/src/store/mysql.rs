/// MySQL store backend
///
/// MySQL has no `RETURNING`, so inserts read the generated key from
/// `LAST_INSERT_ID()` on the same connection. Duplicate usernames surface as
/// `ER_DUP_ENTRY` (1062), which sqlx classifies as a unique violation.

use super::{Store, StoreResult};
use crate::db::pool::mysql_health_check;
use crate::models::{
    task::{CreateTask, Task},
    user::{CreateUser, User},
};
use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::debug;

/// Store backed by a MySQL connection pool
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Wraps an existing pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl Store for MySqlStore {
    fn backend(&self) -> &'static str {
        "mysql"
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<i64> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(data.username)
            .bind(data.password_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_tasks_by_user(&self, user_id: i64) -> StoreResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, text, completed
            FROM tasks
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn insert_task(&self, data: CreateTask) -> StoreResult<Task> {
        let result = sqlx::query("INSERT INTO tasks (user_id, text, completed) VALUES (?, ?, FALSE)")
            .bind(data.user_id)
            .bind(&data.text)
            .execute(&self.pool)
            .await?;

        Ok(Task::from_insert(result.last_insert_id() as i64, data))
    }

    async fn update_task_completed(&self, id: i64, completed: bool) -> StoreResult<()> {
        let result = sqlx::query("UPDATE tasks SET completed = ? WHERE id = ?")
            .bind(completed)
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(task_id = id, rows = result.rows_affected(), "Updated task");
        Ok(())
    }

    async fn delete_task(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(task_id = id, rows = result.rows_affected(), "Deleted task");
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        mysql_health_check(&self.pool).await?;
        Ok(())
    }
}
