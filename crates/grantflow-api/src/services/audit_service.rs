//! Audit log read service.

use sqlx::PgPool;

use grantflow_db::AuditLog;

use crate::error::ApiError;

/// Default page size for audit listings.
const DEFAULT_LIMIT: i64 = 100;

/// Service for reading the append-only audit log.
#[derive(Clone)]
pub struct AuditService {
    pool: PgPool,
}

impl AuditService {
    /// Create a new audit service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List recent audit entries, newest first.
    pub async fn list_recent(&self, limit: Option<i64>) -> Result<Vec<AuditLog>, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 1000);
        Ok(AuditLog::list_recent(&self.pool, limit).await?)
    }
}

#[cfg(test)]
mod tests {
    // Service methods require database setup and are covered by
    // integration tests.
}
