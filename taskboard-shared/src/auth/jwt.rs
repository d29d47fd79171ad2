/// JWT access tokens
///
/// Login and registration hand out an HS256-signed token whose subject is the
/// user ID. Task routes require it in the `Authorization: Bearer` header, so
/// the caller never asserts its own identity in the request body.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: Configurable, 24 hours by default
/// - **Validation**: Signature, expiration, not-before, and issuer
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::jwt::{create_token, validate_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "your-secret-key-at-least-32-bytes-long";
///
/// let claims = Claims::new(42);
/// let token = create_token(&claims, secret)?;
///
/// let validated = validate_token(&token, secret)?;
/// assert_eq!(validated.sub, 42);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issuer written into and required from every token
pub const ISSUER: &str = "taskboard";

/// Default access token lifetime
pub const DEFAULT_EXPIRATION_HOURS: i64 = 24;

/// Longest accepted access token lifetime (one year)
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token was signed for someone else
    #[error("Invalid issuer: expected {expected}")]
    InvalidIssuer { expected: String },
}

/// JWT claims
///
/// - `sub`: user ID
/// - `iss`: always [`ISSUER`]
/// - `iat` / `nbf` / `exp`: Unix timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID
    pub sub: i64,

    /// Issuer
    pub iss: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,

    /// Not before
    pub nbf: i64,
}

impl Claims {
    /// Creates claims with the default expiration
    pub fn new(user_id: i64) -> Self {
        let now = Utc::now();
        Self::issued_at(user_id, now, now + Duration::hours(DEFAULT_EXPIRATION_HOURS))
    }

    /// Creates claims expiring `expires_in` from now
    ///
    /// # Errors
    ///
    /// Returns `JwtError::CreateError` if the expiry falls outside the
    /// representable time range
    pub fn with_expiration(user_id: i64, expires_in: Duration) -> Result<Self, JwtError> {
        let now = Utc::now();
        let exp = now.checked_add_signed(expires_in).ok_or_else(|| {
            JwtError::CreateError(format!("Expiration out of range: {}", expires_in))
        })?;

        Ok(Self::issued_at(user_id, now, exp))
    }

    fn issued_at(user_id: i64, now: DateTime<Utc>, exp: DateTime<Utc>) -> Self {
        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            nbf: now.timestamp(),
        }
    }
}

/// Signs claims into a token string
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Issues a token for `user_id` valid for `expiration_hours`
///
/// # Errors
///
/// Returns `JwtError::CreateError` if the lifetime is out of range or
/// encoding fails
pub fn issue_token(user_id: i64, secret: &str, expiration_hours: i64) -> Result<String, JwtError> {
    let expires_in = Duration::try_hours(expiration_hours).ok_or_else(|| {
        JwtError::CreateError(format!("Expiration out of range: {} hours", expiration_hours))
    })?;

    let claims = Claims::with_expiration(user_id, expires_in)?;
    create_token(&claims, secret)
}

/// Validates a token and extracts its claims
///
/// Checks signature, `exp`, `nbf`, and issuer. No clock leeway is allowed.
///
/// # Errors
///
/// - `JwtError::Expired` if the token is past `exp`
/// - `JwtError::InvalidIssuer` if `iss` is not [`ISSUER`]
/// - `JwtError::ValidationError` for anything else (bad signature, malformed)
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer {
            expected: ISSUER.to_string(),
        },
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}
