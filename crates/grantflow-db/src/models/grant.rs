//! Grant listing entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use grantflow_core::GrantId;

/// A grant listing in the database.
///
/// Created only by administrators; read-only to everyone else.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Grant {
    /// Unique identifier.
    pub id: Uuid,

    /// Grant title.
    pub title: String,

    /// Full description of the grant.
    pub description: String,

    /// Award amount in whole currency units.
    pub amount: i64,

    /// Application deadline.
    pub deadline: DateTime<Utc>,

    /// Eligibility criteria.
    pub eligibility: String,

    /// When the listing was created.
    pub created_at: DateTime<Utc>,
}

impl Grant {
    /// Get the grant ID as a typed `GrantId`.
    #[must_use]
    pub fn grant_id(&self) -> GrantId {
        GrantId::from_uuid(self.id)
    }

    /// Check if the deadline has passed.
    #[must_use]
    pub fn is_past_deadline(&self) -> bool {
        self.deadline <= Utc::now()
    }

    /// Insert a new grant listing.
    pub async fn create<'e, E>(
        executor: E,
        title: &str,
        description: &str,
        amount: i64,
        deadline: DateTime<Utc>,
        eligibility: &str,
    ) -> Result<Self, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r#"
            INSERT INTO grants (title, description, amount, deadline, eligibility)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(amount)
        .bind(deadline)
        .bind(eligibility)
        .fetch_one(executor)
        .await
    }

    /// Find a grant by ID.
    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as("SELECT * FROM grants WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all grant listings, newest first.
    pub async fn list_all<'e, E>(executor: E) -> Result<Vec<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as("SELECT * FROM grants ORDER BY created_at DESC")
            .fetch_all(executor)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_grant(deadline: DateTime<Utc>) -> Grant {
        Grant {
            id: Uuid::new_v4(),
            title: "Community Research Fund".to_string(),
            description: "Funding for community research projects".to_string(),
            amount: 50_000,
            deadline,
            eligibility: "Registered nonprofits".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn deadline_check() {
        assert!(!sample_grant(Utc::now() + Duration::days(30)).is_past_deadline());
        assert!(sample_grant(Utc::now() - Duration::days(1)).is_past_deadline());
    }

    #[test]
    fn typed_grant_id() {
        let grant = sample_grant(Utc::now());
        assert_eq!(grant.grant_id().as_uuid(), &grant.id);
    }

    // Query methods require database setup and are covered by
    // integration tests.
}
