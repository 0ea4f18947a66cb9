//! Grant application service with ownership enforcement.

use sqlx::PgPool;
use uuid::Uuid;

use grantflow_db::{
    Application, ApplicationStatus, ApplicationWithGrant, AuditAction, AuditLog, Grant, User,
};

use crate::error::ApiError;

/// Service for application CRUD with owner-or-admin access checks.
#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    /// Create a new application service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a draft application for a grant.
    ///
    /// The grant must exist; otherwise nothing is recorded.
    pub async fn create(
        &self,
        caller: &User,
        grant_id: Uuid,
    ) -> Result<ApplicationWithGrant, ApiError> {
        let mut tx = self.pool.begin().await?;

        let grant = Grant::find_by_id(&mut *tx, grant_id)
            .await?
            .ok_or(ApiError::NotFound("Grant"))?;

        let application = Application::create(&mut *tx, caller.id, grant.id).await?;

        AuditLog::record(
            &mut *tx,
            Some(caller.id),
            AuditAction::CreateApplication,
            &application.id.to_string(),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            application_id = %application.id,
            grant_id = %grant.id,
            "Application created"
        );

        Ok(ApplicationWithGrant {
            id: application.id,
            user_id: application.user_id,
            grant_id: application.grant_id,
            status: application.status,
            created_at: application.created_at,
            grant_title: grant.title,
            grant_description: grant.description,
            grant_amount: grant.amount,
            grant_deadline: grant.deadline,
            grant_eligibility: grant.eligibility,
        })
    }

    /// List the caller's applications with their grant snapshots.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ApplicationWithGrant>, ApiError> {
        Ok(Application::list_for_user(&self.pool, user_id).await?)
    }

    /// Update an application's status. Owner or admin only.
    pub async fn update_status(
        &self,
        caller: &User,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<ApplicationWithGrant, ApiError> {
        let mut tx = self.pool.begin().await?;

        let application = Application::find_by_id(&mut *tx, id)
            .await?
            .ok_or(ApiError::NotFound("Application"))?;

        check_owner_or_admin(caller, &application)?;

        Application::update_status(&mut *tx, id, status)
            .await?
            .ok_or(ApiError::NotFound("Application"))?;

        AuditLog::record(
            &mut *tx,
            Some(caller.id),
            AuditAction::UpdateApplication,
            &format!("{id} -> {status}"),
        )
        .await?;

        // Read the response row inside the transaction so a concurrent
        // delete cannot turn a committed update into a 404.
        let updated = Application::find_with_grant(&mut *tx, id)
            .await?
            .ok_or(ApiError::NotFound("Application"))?;

        tx.commit().await?;

        tracing::info!(application_id = %id, status = %status, "Application updated");
        Ok(updated)
    }

    /// Delete an application. Owner or admin only.
    pub async fn delete(&self, caller: &User, id: Uuid) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await?;

        let application = Application::find_by_id(&mut *tx, id)
            .await?
            .ok_or(ApiError::NotFound("Application"))?;

        check_owner_or_admin(caller, &application)?;

        Application::delete(&mut *tx, id).await?;

        AuditLog::record(
            &mut *tx,
            Some(caller.id),
            AuditAction::DeleteApplication,
            &id.to_string(),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(application_id = %id, "Application deleted");
        Ok(())
    }
}

/// Forbid callers who neither own the application nor hold the admin
/// role.
fn check_owner_or_admin(caller: &User, application: &Application) -> Result<(), ApiError> {
    if application.is_owned_by(caller.id) || caller.is_admin() {
        Ok(())
    } else {
        tracing::warn!(
            user_id = %caller.id,
            application_id = %application.id,
            "Access denied: not owner or admin"
        );
        Err(ApiError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user_with_role(role: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: format!("{role}@example.com"),
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

    fn application_owned_by(user_id: Uuid) -> Application {
        Application {
            id: Uuid::new_v4(),
            user_id,
            grant_id: Uuid::new_v4(),
            status: "draft".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn owner_allowed() {
        let owner = user_with_role("viewer");
        let app = application_owned_by(owner.id);
        assert!(check_owner_or_admin(&owner, &app).is_ok());
    }

    #[test]
    fn admin_allowed() {
        let admin = user_with_role("admin");
        let app = application_owned_by(Uuid::new_v4());
        assert!(check_owner_or_admin(&admin, &app).is_ok());
    }

    #[test]
    fn other_user_forbidden() {
        let other = user_with_role("editor");
        let app = application_owned_by(Uuid::new_v4());
        assert!(matches!(
            check_owner_or_admin(&other, &app),
            Err(ApiError::Forbidden)
        ));
    }
}
