//! Session token claims.
//!
//! Provides the [`Claims`] struct carrying the RFC 7519 standard claims
//! grantflow uses plus the custom `role` claim for authorization.

use chrono::{Duration, Utc};
use grantflow_core::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role name that grants access to admin endpoints.
pub const ADMIN_ROLE: &str = "admin";

/// JWT claims for a grantflow session token.
///
/// # Standard Claims (RFC 7519)
///
/// - `sub`: Subject (the user ID)
/// - `exp`: Expiration time (Unix timestamp)
/// - `iat`: Issued at (Unix timestamp)
/// - `jti`: JWT ID (unique identifier)
///
/// # Custom Claims
///
/// - `role`: the user's role at issuance time, for authorization
/// - `email`: the user's email, informational
///
/// # Example
///
/// ```
/// use grantflow_auth::Claims;
/// use grantflow_core::UserId;
///
/// let claims = Claims::builder()
///     .subject(UserId::new())
///     .role("viewer")
///     .expires_in_secs(3600)
///     .build();
///
/// assert!(!claims.is_expired());
/// assert!(!claims.is_admin());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject - the user ID as a string.
    pub sub: String,

    /// Expiration time as Unix timestamp.
    pub exp: i64,

    /// Issued at as Unix timestamp.
    pub iat: i64,

    /// JWT ID - unique identifier for this token.
    pub jti: String,

    /// The user's role at issuance time.
    #[serde(default)]
    pub role: String,

    /// User email address (optional, informational).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Claims {
    /// Create a new builder for constructing claims.
    #[must_use]
    pub fn builder() -> ClaimsBuilder {
        ClaimsBuilder::default()
    }

    /// Check if the token is expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Check if the claims carry the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    /// Parse the subject as a [`UserId`], if it is a valid UUID.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.sub.parse().ok()
    }
}

/// Builder for constructing session token claims.
#[derive(Debug, Default)]
pub struct ClaimsBuilder {
    sub: Option<String>,
    exp: Option<i64>,
    role: Option<String>,
    email: Option<String>,
}

impl ClaimsBuilder {
    /// Set the subject from a user ID.
    #[must_use]
    pub fn subject(mut self, user_id: UserId) -> Self {
        self.sub = Some(user_id.to_string());
        self
    }

    /// Set the role claim.
    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the email claim.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the expiration relative to now.
    #[must_use]
    pub fn expires_in_secs(mut self, secs: i64) -> Self {
        self.exp = Some((Utc::now() + Duration::seconds(secs)).timestamp());
        self
    }

    /// Set an absolute expiration timestamp.
    #[must_use]
    pub fn expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Build the claims, filling `iat` with now and `jti` with a fresh
    /// UUID. Missing fields default: empty subject, one-hour expiry,
    /// empty role.
    #[must_use]
    pub fn build(self) -> Claims {
        let now = Utc::now();
        Claims {
            sub: self.sub.unwrap_or_default(),
            exp: self
                .exp
                .unwrap_or_else(|| (now + Duration::hours(1)).timestamp()),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            role: self.role.unwrap_or_default(),
            email: self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_subject_and_role() {
        let user_id = UserId::new();
        let claims = Claims::builder()
            .subject(user_id)
            .role("admin")
            .email("a@example.com")
            .expires_in_secs(3600)
            .build();

        assert_eq!(claims.sub, user_id.to_string());
        assert!(claims.is_admin());
        assert_eq!(claims.email.as_deref(), Some("a@example.com"));
        assert_eq!(claims.user_id(), Some(user_id));
    }

    #[test]
    fn non_admin_role() {
        let claims = Claims::builder().role("viewer").build();
        assert!(!claims.is_admin());
    }

    #[test]
    fn expired_claims_detected() {
        let claims = Claims::builder()
            .expiration(Utc::now().timestamp() - 10)
            .build();
        assert!(claims.is_expired());
    }

    #[test]
    fn jti_is_unique() {
        let a = Claims::builder().build();
        let b = Claims::builder().build();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn invalid_subject_yields_no_user_id() {
        let claims = Claims::builder().build();
        assert_eq!(claims.user_id(), None);
    }
}
