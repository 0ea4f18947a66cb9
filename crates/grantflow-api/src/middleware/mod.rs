//! Request middleware.

pub mod admin_guard;
pub mod jwt_auth;

pub use admin_guard::admin_guard;
pub use jwt_auth::{jwt_auth_middleware, JwtSecret};
