//! Grant listing service.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use grantflow_db::{AuditAction, AuditLog, Grant};

use crate::error::ApiError;

/// Service for grant listing operations.
#[derive(Clone)]
pub struct GrantService {
    pool: PgPool,
}

impl GrantService {
    /// Create a new grant service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a grant listing and the matching audit entry.
    pub async fn create(
        &self,
        actor_id: Uuid,
        title: &str,
        description: &str,
        amount: i64,
        deadline: DateTime<Utc>,
        eligibility: &str,
    ) -> Result<Grant, ApiError> {
        let mut tx = self.pool.begin().await?;

        let grant =
            Grant::create(&mut *tx, title, description, amount, deadline, eligibility).await?;

        AuditLog::record(
            &mut *tx,
            Some(actor_id),
            AuditAction::CreateGrant,
            &grant.title,
        )
        .await?;

        tx.commit().await?;

        tracing::info!(grant_id = %grant.id, "Grant created");
        Ok(grant)
    }

    /// List all grant listings.
    pub async fn list(&self) -> Result<Vec<Grant>, ApiError> {
        Ok(Grant::list_all(&self.pool).await?)
    }

    /// Load a grant by ID.
    pub async fn get(&self, id: Uuid) -> Result<Grant, ApiError> {
        Grant::find_by_id(&self.pool, id)
            .await?
            .ok_or(ApiError::NotFound("Grant"))
    }
}

#[cfg(test)]
mod tests {
    // Service methods require database setup and are covered by
    // integration tests.
}
