//! User entity model.
//!
//! One-time tokens (email verification, password reset) are stored as
//! SHA-256 hashes; the raw token is only ever sent to the user. Both are
//! consumed by a single conditional UPDATE so a token can never succeed
//! twice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use grantflow_core::UserId;

/// A user's role for authorization decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Organization owner.
    Owner,
    /// Can edit shared resources.
    Editor,
    /// Read-mostly default role.
    Viewer,
}

impl Role {
    /// Convert to database string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Owner => "owner",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }

    /// Parse from database string representation. Unknown strings fall
    /// back to the least privileged role.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            "owner" => Self::Owner,
            "editor" => Self::Editor,
            _ => Self::Viewer,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    /// Unique identifier.
    pub id: Uuid,

    /// Email address (unique).
    pub email: String,

    /// Argon2id password hash in PHC string format.
    pub password_hash: String,

    /// Role as stored in the database.
    pub role: String,

    /// Whether the email address has been verified.
    pub is_verified: bool,

    /// SHA-256 hash of the pending verification token, if any.
    pub verification_token: Option<String>,

    /// SHA-256 hash of the pending password reset token, if any.
    pub reset_token: Option<String>,

    /// Customer identifier at the billing provider.
    pub billing_customer_id: Option<String>,

    /// Subscription status as reported by the billing provider.
    pub subscription_status: String,

    /// When the user registered.
    pub created_at: DateTime<Utc>,

    /// When the user was last modified.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Get the user ID as a typed `UserId`.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.id)
    }

    /// Get the role as an enum.
    #[must_use]
    pub fn role(&self) -> Role {
        Role::parse(&self.role)
    }

    /// Check whether this user holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }

    /// Insert a new unverified user.
    pub async fn create<'e, E>(
        executor: E,
        email: &str,
        password_hash: &str,
        role: Role,
        verification_token_hash: &str,
    ) -> Result<Self, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r#"
            INSERT INTO users (email, password_hash, role, verification_token)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(role.as_str())
        .bind(verification_token_hash)
        .fetch_one(executor)
        .await
    }

    /// Find a user by ID.
    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a user by email address.
    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(executor)
            .await
    }

    /// Consume a verification token, marking the user verified.
    ///
    /// The conditional UPDATE guarantees single use: once consumed the
    /// token column is NULL and no later attempt can match.
    pub async fn consume_verification_token<'e, E>(
        executor: E,
        token_hash: &str,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r#"
            UPDATE users
            SET is_verified = TRUE, verification_token = NULL, updated_at = NOW()
            WHERE verification_token = $1
            RETURNING *
            "#,
        )
        .bind(token_hash)
        .fetch_optional(executor)
        .await
    }

    /// Store a password reset token hash for a user.
    pub async fn set_reset_token<'e, E>(
        executor: E,
        id: Uuid,
        token_hash: &str,
    ) -> Result<(), sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE users SET reset_token = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(token_hash)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Consume a reset token, setting the new password hash.
    ///
    /// Single use by the same conditional-UPDATE mechanism as
    /// [`Self::consume_verification_token`].
    pub async fn consume_reset_token<'e, E>(
        executor: E,
        token_hash: &str,
        new_password_hash: &str,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r#"
            UPDATE users
            SET password_hash = $2, reset_token = NULL, updated_at = NOW()
            WHERE reset_token = $1
            RETURNING *
            "#,
        )
        .bind(token_hash)
        .bind(new_password_hash)
        .fetch_optional(executor)
        .await
    }

    /// Update email and/or password hash for a user.
    pub async fn update_profile<'e, E>(
        executor: E,
        id: Uuid,
        email: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r#"
            UPDATE users
            SET email = COALESCE($2, email),
                password_hash = COALESCE($3, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .fetch_optional(executor)
        .await
    }

    /// Attach a billing customer ID to a user.
    pub async fn set_billing_customer<'e, E>(
        executor: E,
        id: Uuid,
        customer_id: &str,
    ) -> Result<(), sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE users SET billing_customer_id = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(customer_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Update the subscription status for a billing customer.
    ///
    /// Returns the number of rows affected (0 if the customer is
    /// unknown).
    pub async fn update_subscription_status<'e, E>(
        executor: E,
        customer_id: &str,
        status: &str,
    ) -> Result<u64, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE users SET subscription_status = $2, updated_at = NOW()
            WHERE billing_customer_id = $1
            "#,
        )
        .bind(customer_id)
        .bind(status)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: role.to_string(),
            is_verified: true,
            verification_token: None,
            reset_token: None,
            billing_customer_id: None,
            subscription_status: "inactive".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn role_round_trip() {
        for role in [Role::Admin, Role::Owner, Role::Editor, Role::Viewer] {
            assert_eq!(Role::parse(role.as_str()), role);
        }
    }

    #[test]
    fn unknown_role_defaults_to_viewer() {
        assert_eq!(Role::parse("superuser"), Role::Viewer);
        assert_eq!(Role::parse(""), Role::Viewer);
    }

    #[test]
    fn admin_detection() {
        assert!(sample_user("admin").is_admin());
        assert!(!sample_user("viewer").is_admin());
        assert!(!sample_user("owner").is_admin());
    }

    #[test]
    fn typed_user_id() {
        let user = sample_user("viewer");
        assert_eq!(user.user_id().as_uuid(), &user.id);
    }

    // Query methods require database setup and are covered by
    // integration tests.
}
