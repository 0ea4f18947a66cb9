//! Account endpoints: registration, verification, login, password
//! reset, and the current-user profile.

use std::sync::Arc;

use axum::{http::StatusCode, Extension, Json};

use grantflow_core::UserId;

use crate::error::ApiError;
use crate::models::{
    validate_request, LoginRequest, RegisterRequest, RegisterResponse,
    RequestPasswordResetRequest, ResetPasswordRequest, ResetRequestedResponse, TokenResponse,
    UpdateProfileRequest, UserResponse, VerifyRequest,
};
use crate::router::DevMode;
use crate::services::AuthService;

/// Register a new account.
#[utoipa::path(
    post,
    path = "/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered"),
    ),
    tag = "Users"
)]
pub async fn register_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Extension(dev_mode): Extension<DevMode>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    validate_request(&request)?;

    let (user, raw_token) = auth_service
        .register(&request.email, &request.password)
        .await?;

    let response = RegisterResponse {
        user: UserResponse::from(user),
        verification_token: dev_mode.0.then_some(raw_token),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Verify an email address with a one-time token.
#[utoipa::path(
    post,
    path = "/users/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Email verified", body = UserResponse),
        (status = 400, description = "Invalid or already used token"),
    ),
    tag = "Users"
)]
pub async fn verify_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    validate_request(&request)?;

    let user = auth_service.verify(&request.token).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Authenticate and issue a bearer token.
#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Users"
)]
pub async fn login_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    validate_request(&request)?;

    let (token, expires_in, _user) = auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(TokenResponse::new(token, expires_in)))
}

/// Start a password reset.
///
/// The response is identical whether or not the account exists.
#[utoipa::path(
    post,
    path = "/users/request-password-reset",
    request_body = RequestPasswordResetRequest,
    responses(
        (status = 200, description = "Reset requested", body = ResetRequestedResponse),
        (status = 400, description = "Validation error"),
    ),
    tag = "Users"
)]
pub async fn request_password_reset_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Extension(dev_mode): Extension<DevMode>,
    Json(request): Json<RequestPasswordResetRequest>,
) -> Result<Json<ResetRequestedResponse>, ApiError> {
    validate_request(&request)?;

    let raw_token = auth_service.request_password_reset(&request.email).await?;

    Ok(Json(ResetRequestedResponse {
        message: "If the account exists, a reset token has been sent".to_string(),
        reset_token: raw_token.filter(|_| dev_mode.0),
    }))
}

/// Complete a password reset with a one-time token.
#[utoipa::path(
    post,
    path = "/users/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = UserResponse),
        (status = 400, description = "Invalid or already used token"),
    ),
    tag = "Users"
)]
pub async fn reset_password_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    validate_request(&request)?;

    let user = auth_service
        .reset_password(&request.token, &request.new_password)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Get the current user's profile.
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Authentication required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn me_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = auth_service.get_user(*user_id.as_uuid()).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update the current user's email and/or password.
#[utoipa::path(
    put,
    path = "/users/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 401, description = "Authentication required"),
        (status = 409, description = "Email already registered"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_me_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Extension(user_id): Extension<UserId>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    validate_request(&request)?;

    let user = auth_service
        .update_profile(
            *user_id.as_uuid(),
            request.email.as_deref(),
            request.password.as_deref(),
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}
