//! Error types for the grantflow HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Error type for the grantflow API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request validation failed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// One-time token (verification or reset) did not match.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Malformed request (e.g. bad webhook signature).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Login failed. Deliberately covers unknown email, wrong password
    /// and unverified accounts with one message.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authentication required.
    #[error("Authentication required")]
    Unauthorized,

    /// Caller lacks the required role or ownership.
    #[error("Forbidden")]
    Forbidden,

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Resource conflict (e.g. duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A required external provider is not configured.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// RFC 7807 Problem Details response format.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ProblemDetails {
    fn new(slug: &str, title: &str, status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            problem_type: format!("https://grantflow.io/problems/{slug}"),
            title: title.to_string(),
            status: status.as_u16(),
            detail: Some(detail.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, problem) = match &self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "validation-error",
                    "Validation Error",
                    StatusCode::BAD_REQUEST,
                    msg.clone(),
                ),
            ),
            ApiError::InvalidToken => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "invalid-token",
                    "Invalid Token",
                    StatusCode::BAD_REQUEST,
                    "The token is invalid or has already been used",
                ),
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "bad-request",
                    "Bad Request",
                    StatusCode::BAD_REQUEST,
                    msg.clone(),
                ),
            ),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ProblemDetails::new(
                    "invalid-credentials",
                    "Unauthorized",
                    StatusCode::UNAUTHORIZED,
                    "Invalid credentials",
                ),
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ProblemDetails::new(
                    "unauthorized",
                    "Unauthorized",
                    StatusCode::UNAUTHORIZED,
                    "Missing or invalid authentication token",
                ),
            ),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                ProblemDetails::new(
                    "forbidden",
                    "Forbidden",
                    StatusCode::FORBIDDEN,
                    "You do not have permission to perform this operation",
                ),
            ),
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                ProblemDetails::new(
                    "not-found",
                    "Not Found",
                    StatusCode::NOT_FOUND,
                    format!("{what} not found"),
                ),
            ),
            ApiError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ProblemDetails::new("conflict", "Conflict", StatusCode::CONFLICT, msg.clone()),
            ),
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ProblemDetails::new(
                    "service-unavailable",
                    "Service Unavailable",
                    StatusCode::SERVICE_UNAVAILABLE,
                    msg.clone(),
                ),
            ),
            ApiError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ProblemDetails::new(
                        "internal-error",
                        "Internal Server Error",
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "A database error occurred",
                    ),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ProblemDetails::new(
                        "internal-error",
                        "Internal Server Error",
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred",
                    ),
                )
            }
        };

        (status, Json(problem)).into_response()
    }
}

impl From<grantflow_auth::AuthError> for ApiError {
    fn from(err: grantflow_auth::AuthError) -> Self {
        use grantflow_auth::AuthError;

        match err {
            AuthError::TokenExpired | AuthError::InvalidSignature | AuthError::InvalidToken(_)
            | AuthError::MissingClaim(_) => ApiError::Unauthorized,
            AuthError::HashingFailed(msg) => ApiError::Internal(msg),
            AuthError::InvalidHashFormat => {
                ApiError::Internal("Stored password hash is malformed".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            ApiError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
        assert_eq!(ApiError::NotFound("Grant").to_string(), "Grant not found");
        assert_eq!(
            ApiError::Validation("email is required".to_string()).to_string(),
            "Validation error: email is required"
        );
    }

    #[test]
    fn problem_type_uri() {
        let problem = ProblemDetails::new("conflict", "Conflict", StatusCode::CONFLICT, "dup");
        assert_eq!(
            problem.problem_type,
            "https://grantflow.io/problems/conflict"
        );
        assert_eq!(problem.status, 409);
    }

    #[test]
    fn auth_error_maps_to_unauthorized() {
        use grantflow_auth::AuthError;

        assert!(matches!(
            ApiError::from(AuthError::TokenExpired),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from(AuthError::InvalidSignature),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from(AuthError::HashingFailed("oops".to_string())),
            ApiError::Internal(_)
        ));
    }
}
