//! PostgreSQL persistence layer for grantflow.
//!
//! Provides the connection pool, embedded migrations, and entity
//! models with their query methods. Query methods are generic over
//! `sqlx::Executor` so they compose into transactions.

pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;

pub use error::DbError;
pub use migrations::run_migrations;
pub use models::{
    Application, ApplicationStatus, ApplicationWithGrant, AuditAction, AuditLog, Grant, Role, User,
};
pub use pool::DbPool;
