//! Application endpoints with owner-or-admin access checks.

use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use uuid::Uuid;

use grantflow_core::UserId;

use crate::error::ApiError;
use crate::models::{ApplicationResponse, CreateApplicationRequest, UpdateApplicationRequest};
use crate::services::{ApplicationService, AuthService};

/// Create a draft application for a grant.
#[utoipa::path(
    post,
    path = "/applications",
    request_body = CreateApplicationRequest,
    responses(
        (status = 201, description = "Application created", body = ApplicationResponse),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Grant not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn create_application_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Extension(application_service): Extension<Arc<ApplicationService>>,
    Extension(user_id): Extension<UserId>,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationResponse>), ApiError> {
    let caller = auth_service.get_user(*user_id.as_uuid()).await?;

    let application = application_service
        .create(&caller, request.grant_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse::from(application)),
    ))
}

/// List the caller's applications.
#[utoipa::path(
    get,
    path = "/applications",
    responses(
        (status = 200, description = "The caller's applications", body = [ApplicationResponse]),
        (status = 401, description = "Authentication required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn list_applications_handler(
    Extension(application_service): Extension<Arc<ApplicationService>>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    let applications = application_service
        .list_for_user(*user_id.as_uuid())
        .await?;

    Ok(Json(
        applications
            .into_iter()
            .map(ApplicationResponse::from)
            .collect(),
    ))
}

/// Update an application's status. Owner or admin only.
#[utoipa::path(
    put,
    path = "/applications/{id}",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = UpdateApplicationRequest,
    responses(
        (status = 200, description = "Application updated", body = ApplicationResponse),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not owner or admin"),
        (status = 404, description = "Application not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn update_application_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Extension(application_service): Extension<Arc<ApplicationService>>,
    Extension(user_id): Extension<UserId>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateApplicationRequest>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let caller = auth_service.get_user(*user_id.as_uuid()).await?;

    let application = application_service
        .update_status(&caller, id, request.status)
        .await?;

    Ok(Json(ApplicationResponse::from(application)))
}

/// Delete an application. Owner or admin only.
#[utoipa::path(
    delete,
    path = "/applications/{id}",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not owner or admin"),
        (status = 404, description = "Application not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn delete_application_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Extension(application_service): Extension<Arc<ApplicationService>>,
    Extension(user_id): Extension<UserId>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let caller = auth_service.get_user(*user_id.as_uuid()).await?;

    application_service.delete(&caller, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    // Handler tests require integration test setup
}
