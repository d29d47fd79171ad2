/// In-memory store backend
///
/// Keeps users and tasks in process memory behind a tokio `RwLock`. It mirrors
/// the SQL backends' observable behavior (generated IDs start at 1, unique
/// usernames, silent update/delete of missing rows), which makes it the
/// backend of choice for router tests and local development.
///
/// # Example
///
/// ```
/// use taskboard_shared::models::task::CreateTask;
/// use taskboard_shared::store::{memory::MemoryStore, Store};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let task = store
///     .insert_task(CreateTask { user_id: 1, text: "buy milk".to_string() })
///     .await?;
///
/// assert_eq!(task.id, 1);
/// assert!(!task.completed);
/// # Ok(())
/// # }
/// ```

use super::{Store, StoreError, StoreResult};
use crate::models::{
    task::{CreateTask, Task},
    user::{CreateUser, User},
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Constraint name reported for duplicate usernames, matching the migrations
pub const USERNAME_CONSTRAINT: &str = "users_username_key";

/// In-memory store
///
/// Cloning is cheap and clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<MemoryData>>,
}

#[derive(Debug)]
struct MemoryData {
    users: HashMap<String, User>,
    tasks: BTreeMap<i64, Task>,
    next_user_id: i64,
    next_task_id: i64,
    healthy: bool,
}

impl Default for MemoryData {
    fn default() -> Self {
        Self {
            users: HashMap::new(),
            tasks: BTreeMap::new(),
            next_user_id: 1,
            next_task_id: 1,
            healthy: true,
        }
    }
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the store reachable or unreachable
    ///
    /// While unhealthy every operation fails with [`StoreError::Unavailable`].
    pub async fn set_healthy(&self, healthy: bool) {
        self.data.write().await.healthy = healthy;
    }

    /// Number of stored tasks across all users
    pub async fn task_count(&self) -> usize {
        self.data.read().await.tasks.len()
    }
}

impl MemoryData {
    fn check_health(&self) -> StoreResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store marked unhealthy".to_string()))
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<i64> {
        let mut guard = self.data.write().await;
        guard.check_health()?;

        if guard.users.contains_key(&data.username) {
            return Err(StoreError::UniqueViolation(Some(
                USERNAME_CONSTRAINT.to_string(),
            )));
        }

        let id = guard.next_user_id;
        guard.next_user_id += 1;
        guard.users.insert(
            data.username.clone(),
            User {
                id,
                username: data.username,
                password_hash: data.password_hash,
            },
        );

        Ok(id)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let guard = self.data.read().await;
        guard.check_health()?;
        Ok(guard.users.get(username).cloned())
    }

    async fn list_tasks_by_user(&self, user_id: i64) -> StoreResult<Vec<Task>> {
        let guard = self.data.read().await;
        guard.check_health()?;
        Ok(guard
            .tasks
            .values()
            .filter(|task| task.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_task(&self, data: CreateTask) -> StoreResult<Task> {
        let mut guard = self.data.write().await;
        guard.check_health()?;

        let id = guard.next_task_id;
        guard.next_task_id += 1;
        let task = Task::from_insert(id, data);
        guard.tasks.insert(id, task.clone());

        Ok(task)
    }

    async fn update_task_completed(&self, id: i64, completed: bool) -> StoreResult<()> {
        let mut guard = self.data.write().await;
        guard.check_health()?;

        if let Some(task) = guard.tasks.get_mut(&id) {
            task.completed = completed;
        }
        Ok(())
    }

    async fn delete_task(&self, id: i64) -> StoreResult<()> {
        let mut guard = self.data.write().await;
        guard.check_health()?;
        guard.tasks.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.data.read().await.check_health()
    }
}
