//! Append-only audit log model.
//!
//! Entries are written in the same transaction as the mutation they
//! record. There is no update or delete path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Well-known audit actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Email verified.
    Verify,
    /// Successful login.
    Login,
    /// Grant listing created.
    CreateGrant,
    /// Application created.
    CreateApplication,
    /// Application updated.
    UpdateApplication,
    /// Application deleted.
    DeleteApplication,
}

impl AuditAction {
    /// Convert to database string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verify => "verify",
            Self::Login => "login",
            Self::CreateGrant => "create_grant",
            Self::CreateApplication => "create_application",
            Self::UpdateApplication => "update_application",
            Self::DeleteApplication => "delete_application",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An audit log entry.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AuditLog {
    /// Unique identifier.
    pub id: Uuid,

    /// The acting user, if known.
    pub user_id: Option<Uuid>,

    /// Action name.
    pub action: String,

    /// Free-form detail string.
    pub details: String,

    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    /// Append an audit entry.
    pub async fn record<'e, E>(
        executor: E,
        user_id: Option<Uuid>,
        action: AuditAction,
        details: &str,
    ) -> Result<Self, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r#"
            INSERT INTO audit_log (user_id, action, details)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(action.as_str())
        .bind(details)
        .fetch_one(executor)
        .await
    }

    /// List recent audit entries, newest first.
    pub async fn list_recent<'e, E>(executor: E, limit: i64) -> Result<Vec<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r#"
            SELECT * FROM audit_log
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(executor)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_strings() {
        assert_eq!(AuditAction::Verify.as_str(), "verify");
        assert_eq!(AuditAction::Login.as_str(), "login");
        assert_eq!(AuditAction::CreateGrant.as_str(), "create_grant");
        assert_eq!(AuditAction::CreateApplication.as_str(), "create_application");
        assert_eq!(AuditAction::UpdateApplication.as_str(), "update_application");
        assert_eq!(AuditAction::DeleteApplication.as_str(), "delete_application");
    }

    // Query methods require database setup and are covered by
    // integration tests.
}
