//! Error types for the grantflow-db crate.
//!
//! Query methods return `sqlx::Error` directly; this type covers the
//! pool and migration lifecycle.

use thiserror::Error;

/// Database lifecycle errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Failed to establish or acquire a database connection.
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[source] sqlx::Error),

    /// A database migration failed to apply.
    #[error("Migration failed: {0}")]
    MigrationFailed(#[source] sqlx::migrate::MigrateError),
}
