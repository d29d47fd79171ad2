/// Password hashing module using Argon2id
///
/// Registration stores only the PHC string produced here; login verifies the
/// submitted password against it. The work factor is fixed, so every stored
/// hash carries the same parameters.
///
/// # Security
///
/// - **Algorithm**: Argon2id (hybrid of Argon2i and Argon2d)
/// - **Memory**: 64 MB (65536 KB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Output**: 32-byte hash
///
/// Hashing is CPU and memory heavy. Request handlers should call the
/// `*_async` variants, which move the work onto tokio's blocking pool.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Hash a password
/// let password = "super_secret_password_123";
/// let hash = hash_password(password)?;
///
/// // Verify the password
/// assert!(verify_password(password, &hash)?);
///
/// // Wrong password fails
/// assert!(!verify_password("wrong_password", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Memory cost in KiB (64 MB)
pub const MEMORY_COST_KIB: u32 = 65536;

/// Number of passes
pub const TIME_COST: u32 = 3;

/// Parallel lanes
pub const PARALLELISM: u32 = 4;

/// Raw hash length in bytes
pub const OUTPUT_LEN: usize = 32;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Hashes a password using Argon2id with the fixed work factor
///
/// A fresh 16-byte salt is drawn from the OS RNG for every call, so hashing
/// the same password twice yields different strings.
///
/// # Returns
///
/// PHC string, e.g. `$argon2id$v=19$m=65536,t=3,p=4$<salt>$<hash>`
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Argon2id instance configured with the fixed work factor
fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = ParamsBuilder::new()
        .m_cost(MEMORY_COST_KIB)
        .t_cost(TIME_COST)
        .p_cost(PARALLELISM)
        .output_len(OUTPUT_LEN)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    Ok(Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params))
}

/// Verifies a password against a stored PHC hash
///
/// Parameters are read back from the hash itself. Comparison is constant-time.
///
/// # Returns
///
/// `Ok(true)` if the password matches, `Ok(false)` if it doesn't
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if the stored value is not a PHC string,
/// or `PasswordError::VerifyError` for any other failure
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    // Parse the stored hash
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    if parsed_hash.hash.is_none() {
        return Err(PasswordError::InvalidHash("Hash has no output".to_string()));
    }

    // Create Argon2 instance (parameters are embedded in the hash)
    let argon2 = Argon2::default();

    // Verify password (constant-time comparison)
    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false), // Wrong password
        Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
    }
}

/// Hashes a password on the blocking thread pool
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails or the blocking task
/// is cancelled.
pub async fn hash_password_async(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| PasswordError::HashError(format!("Hashing task failed: {}", e)))?
}

/// Verifies a password on the blocking thread pool
///
/// # Errors
///
/// Same as [`verify_password`], plus `PasswordError::VerifyError` if the
/// blocking task is cancelled.
pub async fn verify_password_async(password: String, hash: String) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| PasswordError::VerifyError(format!("Verification task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let password = "test_password_123";
        let hash = hash_password(password).expect("Hash should succeed");

        // Hash should start with $argon2id$
        assert!(hash.starts_with("$argon2id$"));

        // Hash should contain version
        assert!(hash.contains("v=19"));

        // Hash should contain parameters
        assert!(hash.contains("m=65536")); // 64 MB
        assert!(hash.contains("t=3"));     // 3 iterations
        assert!(hash.contains("p=4"));     // 4 parallelism
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let password = "same_password";

        let hash1 = hash_password(password).expect("Hash 1 should succeed");
        let hash2 = hash_password(password).expect("Hash 2 should succeed");

        // Different salts = different hashes
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let password = "correct_password";
        let hash = hash_password(password).expect("Hash should succeed");

        let result = verify_password(password, &hash).expect("Verify should succeed");
        assert!(result, "Correct password should verify");
    }

    #[test]
    fn test_verify_password_incorrect() {
        let password = "correct_password";
        let hash = hash_password(password).expect("Hash should succeed");

        let result = verify_password("wrong_password", &hash).expect("Verify should succeed");
        assert!(!result, "Wrong password should not verify");
    }

    #[test]
    fn test_verify_password_empty() {
        let password = "password";
        let hash = hash_password(password).expect("Hash should succeed");

        let result = verify_password("", &hash).expect("Verify should succeed");
        assert!(!result, "Empty password should not verify");
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("password", "invalid_hash");
        assert!(result.is_err(), "Invalid hash should return error");
    }

    #[test]
    fn test_verify_password_malformed_hash() {
        let result = verify_password("password", "$argon2id$invalid");
        assert!(
            matches!(result, Err(PasswordError::InvalidHash(_))),
            "Malformed hash should return error"
        );
    }

    #[test]
    fn test_verify_password_truncated_hash() {
        let hash = hash_password("password").expect("Hash should succeed");
        let truncated = &hash[..hash.rfind('$').unwrap()];

        assert!(matches!(
            verify_password("password", truncated),
            Err(PasswordError::InvalidHash(_))
        ));
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let passwords = vec![
            "simple",
            "with spaces",
            "with-special-chars!@#$%",
            "unicode-密码-パスワード",
            "very_long_password_that_is_longer_than_usual_passwords_123456789",
        ];

        for password in passwords {
            let hash = hash_password(password).expect("Hash should succeed");
            let verified = verify_password(password, &hash).expect("Verify should succeed");
            assert!(verified, "Password '{}' should verify", password);
        }
    }

    #[test]
    fn test_verify_rejects_suffixed_password() {
        let hash = hash_password("pw1").expect("Hash should succeed");

        assert!(verify_password("pw1", &hash).expect("Verify should succeed"));
        assert!(!verify_password("pw1x", &hash).expect("Verify should succeed"));
    }

    #[test]
    fn test_hash_empty_password() {
        let hash = hash_password("").expect("Hash should succeed");
        assert!(verify_password("", &hash).expect("Verify should succeed"));
        assert!(!verify_password(" ", &hash).expect("Verify should succeed"));
    }

    #[tokio::test]
    async fn test_async_roundtrip() {
        let hash = hash_password_async("buy milk".to_string())
            .await
            .expect("Hash should succeed");

        assert!(verify_password_async("buy milk".to_string(), hash.clone())
            .await
            .expect("Verify should succeed"));
        assert!(!verify_password_async("buy milkx".to_string(), hash)
            .await
            .expect("Verify should succeed"));
    }
}
