/// PostgreSQL store backend
///
/// Generated IDs come back through `RETURNING`. Duplicate usernames surface as
/// SQLSTATE 23505, which sqlx classifies as a unique violation.

use super::{Store, StoreResult};
use crate::db::pool::health_check;
use crate::models::{
    task::{CreateTask, Task},
    user::{CreateUser, User},
};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

/// Store backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<i64> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = $1
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
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn insert_task(&self, data: CreateTask) -> StoreResult<Task> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, text, completed)
            VALUES ($1, $2, FALSE)
            RETURNING id, user_id, text, completed
            "#,
        )
        .bind(data.user_id)
        .bind(data.text)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn update_task_completed(&self, id: i64, completed: bool) -> StoreResult<()> {
        let result = sqlx::query("UPDATE tasks SET completed = $1 WHERE id = $2")
            .bind(completed)
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(task_id = id, rows = result.rows_affected(), "Updated task");
        Ok(())
    }

    async fn delete_task(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(task_id = id, rows = result.rows_affected(), "Deleted task");
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        health_check(&self.pool).await?;
        Ok(())
    }
}
