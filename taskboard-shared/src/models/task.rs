/// Task model
///
/// A task is a line of free-form text owned by a user, with a single
/// `completed` flag that can be toggled.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL,
///     text TEXT NOT NULL,
///     completed BOOLEAN NOT NULL DEFAULT FALSE
/// );
/// ```

use serde::{Deserialize, Serialize};

/// Task row as returned by listing
///
/// Serialized with the column names (`user_id`) so list responses mirror the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Store-generated task ID
    pub id: i64,

    /// Owning user ID
    pub user_id: i64,

    /// Task text
    pub text: String,

    /// Completion flag
    pub completed: bool,
}

/// Input for creating a new task
///
/// New tasks always start with `completed = false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owning user ID
    pub user_id: i64,

    /// Task text
    pub text: String,
}

impl Task {
    /// Builds the row a fresh insert produces
    pub fn from_insert(id: i64, data: CreateTask) -> Self {
        Self {
            id,
            user_id: data.user_id,
            text: data.text,
            completed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_insert_starts_incomplete() {
        let task = Task::from_insert(
            3,
            CreateTask {
                user_id: 1,
                text: "buy milk".to_string(),
            },
        );

        assert_eq!(task.id, 3);
        assert_eq!(task.user_id, 1);
        assert_eq!(task.text, "buy milk");
        assert!(!task.completed);
    }

    #[test]
    fn test_task_serializes_column_names() {
        let task = Task {
            id: 1,
            user_id: 2,
            text: "write report".to_string(),
            completed: true,
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["user_id"], 2);
        assert_eq!(json["completed"], true);
    }
}
