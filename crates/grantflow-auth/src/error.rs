//! Error types for authentication primitives.

use thiserror::Error;

/// Errors produced by password hashing and token handling.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token has expired.
    #[error("Token has expired")]
    TokenExpired,

    /// Token signature verification failed.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token is malformed or otherwise invalid.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// A required claim is missing from the token.
    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    /// Password hashing failed.
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored password hash is not a valid PHC string.
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}
