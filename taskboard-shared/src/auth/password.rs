/// Password hashing using Argon2id
///
/// Seeded accounts and password changes store PHC-format Argon2id hashes.
/// Verification reads the parameters back from the hash itself, so hashes
/// produced with older parameters keep verifying.
///
/// Parameters are 19 MiB of memory, 2 passes, 1 lane and a 32-byte output.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("1234")?;
/// assert!(verify_password("1234", &hash)?);
/// assert!(!verify_password("4321", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Minimum length of a new password, after trimming
pub const MIN_PASSWORD_LEN: usize = 4;

/// Argon2 memory cost in KiB
const MEMORY_KIB: u32 = 19_456;
const PASSES: u32 = 2;
const LANES: u32 = 1;
const OUTPUT_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashError(String),

    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Stored value is not a PHC string
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = ParamsBuilder::new()
        .m_cost(MEMORY_KIB)
        .t_cost(PASSES)
        .p_cost(LANES)
        .output_len(OUTPUT_LEN)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    Ok(Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password into a PHC string with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Checks a password against a stored hash in constant time
///
/// A mismatch is `Ok(false)`; only an unreadable hash or an internal failure
/// is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let stored = PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

    match hasher()?.verify_password(password.as_bytes(), &stored) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

/// Checks a new password before it is hashed
///
/// Surrounding whitespace does not count towards the minimum length.
pub fn validate_new_password(password: &str) -> Result<(), String> {
    if password.trim().chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_password_round_trip() {
        let hash = hash_password("1234").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));

        assert!(verify_password("1234", &hash).unwrap());
        assert!(!verify_password("12345", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(hash_password("1234").unwrap(), hash_password("1234").unwrap());
    }

    #[test]
    fn test_placeholder_hash_is_an_error() {
        let err = verify_password("1234", "test_hash").unwrap_err();
        assert!(matches!(err, PasswordError::InvalidHash(_)));
    }

    #[test]
    fn test_new_password_length_ignores_padding() {
        assert!(validate_new_password("abcd").is_ok());
        assert!(validate_new_password("  ab  ").is_err());
        assert!(validate_new_password("").is_err());
    }
}
