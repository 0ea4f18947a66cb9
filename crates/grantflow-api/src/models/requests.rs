//! Request DTOs with validation rules.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use grantflow_db::ApplicationStatus;

use crate::error::ApiError;

/// Collapse `validator` field errors into one message for the API error.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{field}: {msg}"),
                None => format!("{field}: invalid"),
            })
        })
        .collect();

    messages.join(", ")
}

/// Validate a request DTO, mapping failures to `ApiError::Validation`.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(validation_message(&e)))
}

/// Registration request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Email address for the new account.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    /// Password, at least 8 characters.
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
}

/// Email verification request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyRequest {
    /// The one-time verification token from the registration email.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub token: String,
}

/// Login request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    /// Password.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

/// Password reset request (step one).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RequestPasswordResetRequest {
    /// Email address of the account.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
}

/// Password reset confirmation (step two).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    /// The one-time reset token.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub token: String,

    /// New password, at least 8 characters.
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub new_password: String,
}

/// Partial profile update for the current user.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    /// New email address.
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,

    /// New password, at least 8 characters.
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: Option<String>,
}

/// Grant creation request (admin only).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGrantRequest {
    /// Grant title.
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub title: String,

    /// Full description.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: String,

    /// Award amount in whole currency units.
    #[validate(range(min = 0, message = "must not be negative"))]
    pub amount: i64,

    /// Application deadline.
    pub deadline: DateTime<Utc>,

    /// Eligibility criteria.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub eligibility: String,
}

/// Application creation request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateApplicationRequest {
    /// The grant to apply for.
    pub grant_id: Uuid,
}

/// Application status update.
///
/// Deserialization rejects unknown status strings, so no further
/// validation is needed.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateApplicationRequest {
    /// New status.
    #[schema(value_type = String, example = "submitted")]
    pub status: ApplicationStatus,
}

/// AI draft generation request.
///
/// Either a raw `prompt` or the structured project fields.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateDraftRequest {
    /// Raw prompt; takes precedence over the structured fields.
    pub prompt: Option<String>,

    /// Project name.
    pub project_name: Option<String>,

    /// Project budget.
    pub budget: Option<String>,

    /// Project description.
    pub description: Option<String>,
}

impl GenerateDraftRequest {
    /// Build the completion prompt, preferring a raw prompt when given.
    #[must_use]
    pub fn build_prompt(&self) -> String {
        if let Some(prompt) = &self.prompt {
            return prompt.clone();
        }

        format!(
            "Project: {}\nBudget: {}\nDescription: {}\n\nWrite a grant application proposal.",
            self.project_name.as_deref().unwrap_or(""),
            self.budget.as_deref().unwrap_or(""),
            self.description.as_deref().unwrap_or(""),
        )
    }
}
