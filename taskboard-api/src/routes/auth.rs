/// Authentication endpoints
///
/// - `POST /register` - Create an account
/// - `POST /login` - Check credentials
///
/// Both answer with the user ID and a bearer token for the task routes.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{jwt, password},
    models::user::CreateUser,
    store::StoreError,
};
use validator::Validate;

/// Conflict message for a taken username
pub const USERNAME_TAKEN: &str = "Username already exists";

/// Unauthorized message for an unknown username
pub const USERNAME_NOT_FOUND: &str = "Username not found";

/// Unauthorized message for a wrong password
pub const INVALID_PASSWORD: &str = "Invalid Password";

/// Credentials body shared by register and login
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Login name
    #[validate(length(min = 1, max = 255, message = "Username must be 1-255 characters"))]
    pub username: String,

    /// Plaintext password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful register/login response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Always true
    pub success: bool,

    /// Authenticated user ID
    pub user_id: i64,

    /// Bearer token for the task routes
    pub token: String,
}

impl AuthResponse {
    fn issue(state: &AppState, user_id: i64) -> ApiResult<Self> {
        let token = jwt::issue_token(
            user_id,
            state.jwt_secret(),
            state.config.jwt.expiration_hours,
        )?;

        Ok(Self {
            success: true,
            user_id,
            token,
        })
    }
}

/// Register a new user
///
/// ```text
/// POST /register
/// { "username": "alice", "password": "pw1" }
/// ```
///
/// # Response
///
/// ```json
/// { "success": true, "userId": 1, "token": "eyJ..." }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Body is not valid JSON
/// - `409 Conflict`: Username already exists
/// - `422 Unprocessable Entity`: Empty username or password
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let password_hash = password::hash_password_async(req.password).await?;

    let user_id = state
        .store
        .create_user(CreateUser {
            username: req.username.clone(),
            password_hash,
        })
        .await
        .map_err(|e| match e {
            StoreError::UniqueViolation(_) => ApiError::Conflict(USERNAME_TAKEN.to_string()),
            other => other.into(),
        })?;

    tracing::info!(user_id, username = %req.username, "Registered user");

    Ok(Json(AuthResponse::issue(&state, user_id)?))
}

/// Log in with username and password
///
/// ```text
/// POST /login
/// { "username": "alice", "password": "pw1" }
/// ```
///
/// # Response
///
/// ```json
/// { "success": true, "userId": 1, "token": "eyJ..." }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown username, or wrong password
/// - `422 Unprocessable Entity`: Empty username or password
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let user = state
        .store
        .find_user_by_username(&req.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(USERNAME_NOT_FOUND.to_string()))?;

    let valid = password::verify_password_async(req.password, user.password_hash).await?;
    if !valid {
        tracing::debug!(user_id = user.id, "Rejected login: wrong password");
        return Err(ApiError::Unauthorized(INVALID_PASSWORD.to_string()));
    }

    Ok(Json(AuthResponse::issue(&state, user.id)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_validation() {
        let ok = CredentialsRequest {
            username: "alice".to_string(),
            password: "pw1".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty_username = CredentialsRequest {
            username: String::new(),
            password: "pw1".to_string(),
        };
        assert!(empty_username.validate().is_err());

        let empty_password = CredentialsRequest {
            username: "alice".to_string(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());

        let long_username = CredentialsRequest {
            username: "a".repeat(256),
            password: "pw1".to_string(),
        };
        assert!(long_username.validate().is_err());
    }

    #[test]
    fn test_auth_response_uses_camel_case() {
        let response = AuthResponse {
            success: true,
            user_id: 9,
            token: "t".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["userId"], 9);
        assert!(json.get("user_id").is_none());
    }
}
