//! Password hashing with Argon2id.
//!
//! Parameters follow the OWASP recommendation (19 MiB memory, 2
//! iterations, parallelism 1). Hashes are stored as PHC strings, so
//! parameter upgrades remain verifiable against old hashes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2, Params,
};

use crate::error::AuthError;

/// Argon2id memory cost in KiB (19 MiB).
const MEMORY_COST_KIB: u32 = 19 * 1024;

/// Argon2id iteration count.
const TIME_COST: u32 = 2;

/// Argon2id parallelism.
const PARALLELISM: u32 = 1;

/// Argon2id password hasher.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher {
    /// Create a hasher with the default OWASP parameters.
    #[must_use]
    pub fn new() -> Self {
        // Parameters are compile-time constants known to be valid.
        let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
            .unwrap_or_else(|_| Params::default());
        Self { params }
    }

    /// Create a hasher with custom parameters.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::HashingFailed` if the parameters are invalid.
    pub fn with_params(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AuthError::HashingFailed(e.to_string()))?;
        Ok(Self { params })
    }

    /// Hash a password, returning a PHC-format string.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::HashingFailed` if hashing fails.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            self.params.clone(),
        );

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored PHC hash string.
    ///
    /// Returns `Ok(false)` on mismatch; errors only when the stored
    /// hash cannot be parsed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidHashFormat` if the hash is not a
    /// valid PHC string.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::InvalidHashFormat)?;

        // Verification reads parameters from the hash itself, so old
        // hashes remain checkable after parameter upgrades.
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(_) => Err(AuthError::InvalidHashFormat),
        }
    }
}

/// Hash a password with the default parameters.
///
/// # Errors
///
/// Returns `AuthError::HashingFailed` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    PasswordHasher::new().hash(password)
}

/// Verify a password against a stored hash with the default parameters.
///
/// # Errors
///
/// Returns `AuthError::InvalidHashFormat` if the hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    PasswordHasher::new().verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests use reduced parameters to keep the suite fast.
    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_params(1024, 1, 1).unwrap()
    }

    #[test]
    fn hash_and_verify_round_trip() {
        let hasher = fast_hasher();
        let hash = hasher.hash("correct horse battery staple").unwrap();
        assert!(hasher.verify("correct horse battery staple", &hash).unwrap());
    }

    #[test]
    fn wrong_password_rejected() {
        let hasher = fast_hasher();
        let hash = hasher.hash("secret-one").unwrap();
        assert!(!hasher.verify("secret-two", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = fast_hasher();
        let a = hasher.hash("same password").unwrap();
        let b = hasher.hash("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn hash_is_phc_argon2id() {
        let hash = fast_hasher().hash("pw").unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn garbage_hash_is_invalid_format() {
        let result = fast_hasher().verify("pw", "not-a-phc-string");
        assert!(matches!(result.unwrap_err(), AuthError::InvalidHashFormat));
    }

    #[test]
    fn invalid_params_rejected() {
        assert!(PasswordHasher::with_params(0, 0, 0).is_err());
    }
}
