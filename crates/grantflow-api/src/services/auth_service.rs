//! Account lifecycle service: registration, verification, login,
//! password reset, and profile updates.

use sqlx::PgPool;

use grantflow_auth::{encode_token, Claims, PasswordHasher};
use grantflow_db::{AuditAction, AuditLog, Role, User};

use crate::error::ApiError;
use crate::services::one_time_token::{generate_token, hash_token};

/// Default session token lifetime in seconds.
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Service for account lifecycle operations.
#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    hasher: PasswordHasher,
    jwt_secret: String,
    token_ttl_secs: i64,
}

impl AuthService {
    /// Create a new auth service.
    #[must_use]
    pub fn new(pool: PgPool, jwt_secret: String) -> Self {
        Self {
            pool,
            hasher: PasswordHasher::new(),
            jwt_secret,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }

    /// Override the session token lifetime.
    #[must_use]
    pub fn with_token_ttl(mut self, ttl_secs: i64) -> Self {
        self.token_ttl_secs = ttl_secs;
        self
    }

    /// Register a new account.
    ///
    /// Returns the created user and the raw verification token. The
    /// token is delivered out of band; only development mode puts it in
    /// the response body.
    pub async fn register(&self, email: &str, password: &str) -> Result<(User, String), ApiError> {
        if User::find_by_email(&self.pool, email).await?.is_some() {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = self.hasher.hash(password)?;
        let raw_token = generate_token();

        let user = User::create(
            &self.pool,
            email,
            &password_hash,
            Role::Viewer,
            &hash_token(&raw_token),
        )
        .await
        .map_err(|e| {
            // The pre-check races with concurrent registration; the
            // unique constraint is the real arbiter.
            if is_unique_violation(&e) {
                ApiError::Conflict("Email already registered".to_string())
            } else {
                ApiError::Database(e)
            }
        })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok((user, raw_token))
    }

    /// Consume a verification token, marking the account verified.
    pub async fn verify(&self, token: &str) -> Result<User, ApiError> {
        let mut tx = self.pool.begin().await?;

        let user = User::consume_verification_token(&mut *tx, &hash_token(token))
            .await?
            .ok_or(ApiError::InvalidToken)?;

        AuditLog::record(&mut *tx, Some(user.id), AuditAction::Verify, &user.email).await?;

        tx.commit().await?;

        tracing::info!(user_id = %user.id, "Email verified");
        Ok(user)
    }

    /// Authenticate and issue a bearer token.
    ///
    /// Unknown email, wrong password and unverified accounts all
    /// produce the same `InvalidCredentials` error.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, i64, User), ApiError> {
        let user = User::find_by_email(&self.pool, email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        let password_ok = self.hasher.verify(password, &user.password_hash)?;
        if !password_ok || !user.is_verified {
            return Err(ApiError::InvalidCredentials);
        }

        AuditLog::record(&self.pool, Some(user.id), AuditAction::Login, &user.email).await?;

        let claims = Claims::builder()
            .subject(user.user_id())
            .role(&user.role)
            .email(&user.email)
            .expires_in_secs(self.token_ttl_secs)
            .build();

        let token = encode_token(&claims, self.jwt_secret.as_bytes())
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.id, "Login successful");
        Ok((token, self.token_ttl_secs, user))
    }

    /// Start a password reset for an email address.
    ///
    /// Returns the raw reset token if the account exists. Callers must
    /// respond identically either way so the endpoint cannot be used
    /// for account enumeration.
    pub async fn request_password_reset(&self, email: &str) -> Result<Option<String>, ApiError> {
        let Some(user) = User::find_by_email(&self.pool, email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(None);
        };

        let raw_token = generate_token();
        User::set_reset_token(&self.pool, user.id, &hash_token(&raw_token)).await?;

        tracing::info!(user_id = %user.id, "Password reset token issued");
        Ok(Some(raw_token))
    }

    /// Consume a reset token and set the new password.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<User, ApiError> {
        let new_hash = self.hasher.hash(new_password)?;

        let user = User::consume_reset_token(&self.pool, &hash_token(token), &new_hash)
            .await?
            .ok_or(ApiError::InvalidToken)?;

        tracing::info!(user_id = %user.id, "Password reset");
        Ok(user)
    }

    /// Load a user by ID.
    pub async fn get_user(&self, id: uuid::Uuid) -> Result<User, ApiError> {
        User::find_by_id(&self.pool, id)
            .await?
            .ok_or(ApiError::NotFound("User"))
    }

    /// Update the current user's email and/or password.
    pub async fn update_profile(
        &self,
        id: uuid::Uuid,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, ApiError> {
        let password_hash = match password {
            Some(p) => Some(self.hasher.hash(p)?),
            None => None,
        };

        User::update_profile(&self.pool, id, email, password_hash.as_deref())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::Conflict("Email already registered".to_string())
                } else {
                    ApiError::Database(e)
                }
            })?
            .ok_or(ApiError::NotFound("User"))
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(e) if e.is_unique_violation())
}

#[cfg(test)]
mod tests {
    // Service methods require database setup and are covered by
    // integration tests.
}
