//! Grant application entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use grantflow_core::{ApplicationId, GrantId, UserId};

/// Lifecycle status of a grant application.
///
/// Stored as TEXT; no transition graph is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Being drafted by the applicant.
    Draft,
    /// Submitted for consideration.
    Submitted,
    /// Being reviewed.
    UnderReview,
    /// Accepted.
    Accepted,
    /// Rejected.
    Rejected,
}

impl ApplicationStatus {
    /// Convert to database string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Parse from database string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "submitted" => Some(Self::Submitted),
            "under_review" => Some(Self::UnderReview),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A grant application record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Application {
    /// Unique identifier.
    pub id: Uuid,

    /// The applying user.
    pub user_id: Uuid,

    /// The grant being applied for.
    pub grant_id: Uuid,

    /// Status as stored in the database.
    pub status: String,

    /// When the application was created.
    pub created_at: DateTime<Utc>,
}

/// An application joined with a snapshot of its grant listing.
///
/// Column aliases keep the two rows' fields apart in one SELECT.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationWithGrant {
    /// Application ID.
    pub id: Uuid,

    /// The applying user.
    pub user_id: Uuid,

    /// The grant being applied for.
    pub grant_id: Uuid,

    /// Application status.
    pub status: String,

    /// When the application was created.
    pub created_at: DateTime<Utc>,

    /// Grant title.
    pub grant_title: String,

    /// Grant description.
    pub grant_description: String,

    /// Grant award amount.
    pub grant_amount: i64,

    /// Grant deadline.
    pub grant_deadline: DateTime<Utc>,

    /// Grant eligibility criteria.
    pub grant_eligibility: String,
}

const WITH_GRANT_COLUMNS: &str = r#"
    a.id, a.user_id, a.grant_id, a.status, a.created_at,
    g.title AS grant_title,
    g.description AS grant_description,
    g.amount AS grant_amount,
    g.deadline AS grant_deadline,
    g.eligibility AS grant_eligibility
"#;

impl Application {
    /// Get the application ID as a typed `ApplicationId`.
    #[must_use]
    pub fn application_id(&self) -> ApplicationId {
        ApplicationId::from_uuid(self.id)
    }

    /// Get the owner's ID as a typed `UserId`.
    #[must_use]
    pub fn owner_id(&self) -> UserId {
        UserId::from_uuid(self.user_id)
    }

    /// Get the grant's ID as a typed `GrantId`.
    #[must_use]
    pub fn grant_id(&self) -> GrantId {
        GrantId::from_uuid(self.grant_id)
    }

    /// Get the status as an enum. Unknown strings read as `Draft`.
    #[must_use]
    pub fn status(&self) -> ApplicationStatus {
        ApplicationStatus::parse(&self.status).unwrap_or(ApplicationStatus::Draft)
    }

    /// Check whether a caller owns this application.
    #[must_use]
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Insert a new application in draft status.
    pub async fn create<'e, E>(
        executor: E,
        user_id: Uuid,
        grant_id: Uuid,
    ) -> Result<Self, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r#"
            INSERT INTO applications (user_id, grant_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(grant_id)
        .fetch_one(executor)
        .await
    }

    /// Find an application by ID.
    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find an application joined with its grant snapshot.
    pub async fn find_with_grant<'e, E>(
        executor: E,
        id: Uuid,
    ) -> Result<Option<ApplicationWithGrant>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let sql = format!(
            "SELECT {WITH_GRANT_COLUMNS} FROM applications a \
             JOIN grants g ON g.id = a.grant_id WHERE a.id = $1"
        );

        sqlx::query_as(&sql).bind(id).fetch_optional(executor).await
    }

    /// List a user's applications, each with its grant snapshot,
    /// newest first.
    pub async fn list_for_user<'e, E>(
        executor: E,
        user_id: Uuid,
    ) -> Result<Vec<ApplicationWithGrant>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let sql = format!(
            "SELECT {WITH_GRANT_COLUMNS} FROM applications a \
             JOIN grants g ON g.id = a.grant_id \
             WHERE a.user_id = $1 ORDER BY a.created_at DESC"
        );

        sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_all(executor)
            .await
    }

    /// Update an application's status.
    pub async fn update_status<'e, E>(
        executor: E,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r#"
            UPDATE applications SET status = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(executor)
        .await
    }

    /// Delete an application. Returns the number of rows deleted.
    pub async fn delete<'e, E>(executor: E, id: Uuid) -> Result<u64, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}

impl ApplicationWithGrant {
    /// Get the status as an enum. Unknown strings read as `Draft`.
    #[must_use]
    pub fn status(&self) -> ApplicationStatus {
        ApplicationStatus::parse(&self.status).unwrap_or(ApplicationStatus::Draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trip() {
        for status in [
            ApplicationStatus::Draft,
            ApplicationStatus::Submitted,
            ApplicationStatus::UnderReview,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_status_rejected() {
        assert_eq!(ApplicationStatus::parse("approved"), None);
        assert_eq!(ApplicationStatus::parse(""), None);
    }

    #[test]
    fn ownership_check() {
        let owner = Uuid::new_v4();
        let app = Application {
            id: Uuid::new_v4(),
            user_id: owner,
            grant_id: Uuid::new_v4(),
            status: "draft".to_string(),
            created_at: Utc::now(),
        };

        assert!(app.is_owned_by(owner));
        assert!(!app.is_owned_by(Uuid::new_v4()));
        assert_eq!(app.status(), ApplicationStatus::Draft);
    }

    // Query methods require database setup and are covered by
    // integration tests.
}
