//! Authentication primitives for grantflow.
//!
//! Provides Argon2id password hashing and HS256 session token
//! encoding/decoding. This crate is deliberately independent of the
//! HTTP and database layers so it can be unit tested in isolation.

pub mod claims;
pub mod error;
pub mod jwt;
pub mod password;

pub use claims::{Claims, ClaimsBuilder, ADMIN_ROLE};
pub use error::AuthError;
pub use jwt::{decode_token, encode_token};
pub use password::{hash_password, verify_password, PasswordHasher};
