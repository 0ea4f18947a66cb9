//! Response DTOs.
//!
//! Database rows never serialize directly; each response type selects
//! the fields the API exposes (password hashes and token hashes stay
//! out).

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use grantflow_db::{ApplicationWithGrant, AuditLog, Grant, User};

/// Public view of a user.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Role name.
    pub role: String,
    /// Whether the email address has been verified.
    pub is_verified: bool,
    /// Subscription status from the billing provider.
    pub subscription_status: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            is_verified: user.is_verified,
            subscription_status: user.subscription_status,
            created_at: user.created_at,
        }
    }
}

/// Registration response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    /// The created user.
    pub user: UserResponse,
    /// Raw verification token. Only present in development mode, where
    /// no email provider delivers it out of band.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_token: Option<String>,
}

/// Issued bearer token.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// The signed access token.
    pub access_token: String,
    /// Always "bearer".
    pub token_type: String,
    /// Seconds until expiry.
    pub expires_in: i64,
}

impl TokenResponse {
    /// Build a bearer token response.
    #[must_use]
    pub fn new(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
        }
    }
}

/// Password reset request acknowledgement.
///
/// The body is identical whether or not the account exists, so the
/// endpoint cannot be used for account enumeration.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResetRequestedResponse {
    /// Human-readable message.
    pub message: String,
    /// Raw reset token. Only present in development mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
}

/// Public view of a grant listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GrantResponse {
    /// Grant ID.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Award amount.
    pub amount: i64,
    /// Application deadline.
    pub deadline: DateTime<Utc>,
    /// Eligibility criteria.
    pub eligibility: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<Grant> for GrantResponse {
    fn from(grant: Grant) -> Self {
        Self {
            id: grant.id,
            title: grant.title,
            description: grant.description,
            amount: grant.amount,
            deadline: grant.deadline,
            eligibility: grant.eligibility,
            created_at: grant.created_at,
        }
    }
}

/// Snapshot of the grant embedded in an application response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GrantSummary {
    /// Grant ID.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Award amount.
    pub amount: i64,
    /// Application deadline.
    pub deadline: DateTime<Utc>,
    /// Eligibility criteria.
    pub eligibility: String,
}

/// An application with its grant snapshot.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApplicationResponse {
    /// Application ID.
    pub id: Uuid,
    /// The applying user.
    pub user_id: Uuid,
    /// Status name.
    pub status: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// The grant this application targets.
    pub grant: GrantSummary,
}

impl From<ApplicationWithGrant> for ApplicationResponse {
    fn from(row: ApplicationWithGrant) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            status: row.status,
            created_at: row.created_at,
            grant: GrantSummary {
                id: row.grant_id,
                title: row.grant_title,
                description: row.grant_description,
                amount: row.grant_amount,
                deadline: row.grant_deadline,
                eligibility: row.grant_eligibility,
            },
        }
    }
}

/// An audit log entry.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuditLogResponse {
    /// Entry ID.
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

impl From<AuditLog> for AuditLogResponse {
    fn from(entry: AuditLog) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id,
            action: entry.action,
            details: entry.details,
            created_at: entry.created_at,
        }
    }
}

/// Hosted checkout session.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    /// URL of the provider's hosted checkout page.
    pub checkout_url: String,
}

/// Generated application draft.
#[derive(Debug, Serialize, ToSchema)]
pub struct DraftResponse {
    /// The generated text, verbatim from the provider.
    pub draft: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_response_omits_secrets() {
        let user = User {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: "viewer".to_string(),
            is_verified: true,
            verification_token: Some("hash".to_string()),
            reset_token: None,
            billing_customer_id: None,
            subscription_status: "inactive".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = UserResponse::from(user);
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
        assert!(!json.contains("token"));
    }

    #[test]
    fn register_response_hides_absent_token() {
        let response = RegisterResponse {
            user: UserResponse {
                id: Uuid::new_v4(),
                email: "user@example.com".to_string(),
                role: "viewer".to_string(),
                is_verified: false,
                subscription_status: "inactive".to_string(),
                created_at: Utc::now(),
            },
            verification_token: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("verification_token"));
    }

    #[test]
    fn token_response_is_bearer() {
        let response = TokenResponse::new("abc".to_string(), 3600);
        assert_eq!(response.token_type, "bearer");
        assert_eq!(response.expires_in, 3600);
    }
}
