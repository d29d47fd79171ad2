/// User model
///
/// Users are created at registration and read back at login. They are never
/// updated or deleted by the service.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,               -- BIGINT AUTO_INCREMENT on MySQL
///     username VARCHAR(255) NOT NULL UNIQUE,
///     password TEXT NOT NULL                  -- Argon2id PHC string
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::user::CreateUser;
/// use taskboard_shared::store::{memory::MemoryStore, Store};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
///
/// let user_id = store
///     .create_user(CreateUser {
///         username: "alice".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     })
///     .await?;
///
/// let found = store.find_user_by_username("alice").await?;
/// assert_eq!(found.map(|u| u.id), Some(user_id));
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};

/// User account
///
/// The password is stored as an Argon2id hash in the `password` column,
/// never in plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Store-generated user ID
    pub id: i64,

    /// Login name, unique across all users
    pub username: String,

    /// Argon2id password hash
    #[sqlx(rename = "password")]
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Login name
    pub username: String,

    /// Argon2id password hash (NOT plaintext password!)
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialization_hides_hash() {
        let user = User {
            id: 7,
            username: "alice".to_string(),
            password_hash: "$argon2id$secret".to_string(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["username"], "alice");
        assert!(json.get("password_hash").is_none());
    }
}
