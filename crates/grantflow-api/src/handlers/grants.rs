//! Grant listing endpoints.

use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use uuid::Uuid;

use grantflow_core::UserId;

use crate::error::ApiError;
use crate::models::{validate_request, CreateGrantRequest, GrantResponse};
use crate::services::GrantService;

/// List all grant listings.
#[utoipa::path(
    get,
    path = "/grants",
    responses(
        (status = 200, description = "Grant listings", body = [GrantResponse]),
        (status = 401, description = "Authentication required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Grants"
)]
pub async fn list_grants_handler(
    Extension(grant_service): Extension<Arc<GrantService>>,
) -> Result<Json<Vec<GrantResponse>>, ApiError> {
    let grants = grant_service.list().await?;
    Ok(Json(grants.into_iter().map(GrantResponse::from).collect()))
}

/// Get a single grant listing.
#[utoipa::path(
    get,
    path = "/grants/{id}",
    params(("id" = Uuid, Path, description = "Grant ID")),
    responses(
        (status = 200, description = "Grant listing", body = GrantResponse),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Grant not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Grants"
)]
pub async fn get_grant_handler(
    Extension(grant_service): Extension<Arc<GrantService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<GrantResponse>, ApiError> {
    let grant = grant_service.get(id).await?;
    Ok(Json(GrantResponse::from(grant)))
}

/// Create a grant listing (admin only).
#[utoipa::path(
    post,
    path = "/admin/grants",
    request_body = CreateGrantRequest,
    responses(
        (status = 201, description = "Grant created", body = GrantResponse),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin role required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_grant_handler(
    Extension(grant_service): Extension<Arc<GrantService>>,
    Extension(user_id): Extension<UserId>,
    Json(request): Json<CreateGrantRequest>,
) -> Result<(StatusCode, Json<GrantResponse>), ApiError> {
    validate_request(&request)?;

    let grant = grant_service
        .create(
            *user_id.as_uuid(),
            &request.title,
            &request.description,
            request.amount,
            request.deadline,
            &request.eligibility,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(GrantResponse::from(grant))))
}

#[cfg(test)]
mod tests {
    // Handler tests require integration test setup
}
