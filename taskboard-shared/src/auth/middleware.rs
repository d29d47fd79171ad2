/// Request authentication for Axum
///
/// Validates `Authorization: Bearer <token>` headers. The API server's auth
/// layer calls [`authenticate`] and stores the resulting [`AuthContext`] in
/// the request extensions, where handlers pick it up:
///
/// ```
/// use axum::Extension;
/// use taskboard_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
/// ```

use axum::{extract::Request, http::header};
use serde::{Deserialize, Serialize};

use super::jwt::{validate_token, JwtError};

/// Authentication context added to request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID (token subject)
    pub user_id: i64,
}

impl AuthContext {
    /// Creates auth context for a validated token subject
    pub fn from_jwt(user_id: i64) -> Self {
        Self { user_id }
    }

    /// Whether the authenticated user is `user_id`
    pub fn is_user(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Error type for request authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing authorization header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Authorization header is not a Bearer token
    #[error("{0}")]
    InvalidFormat(String),

    /// Token validation failed
    #[error("{0}")]
    InvalidToken(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
            JwtError::InvalidIssuer { .. } => AuthError::InvalidToken("Invalid issuer".to_string()),
            _ => AuthError::InvalidToken("Invalid token".to_string()),
        }
    }
}

/// Extracts and validates the bearer token of a request
///
/// # Errors
///
/// - `AuthError::MissingCredentials` if there is no Authorization header
/// - `AuthError::InvalidFormat` if it is not `Bearer <token>`
/// - `AuthError::InvalidToken` if the token fails validation
pub fn authenticate(req: &Request, secret: &str) -> Result<AuthContext, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_token(token.trim(), secret)?;
    Ok(AuthContext::from_jwt(claims.sub))
}
