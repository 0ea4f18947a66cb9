//! Audit log endpoints (admin only).

use std::sync::Arc;

use axum::{extract::Query, Extension, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::models::AuditLogResponse;
use crate::services::AuditService;

/// Query parameters for audit listing.
#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    /// Maximum number of entries (default 100, capped at 1000).
    pub limit: Option<i64>,
}

/// List recent audit entries, newest first.
#[utoipa::path(
    get,
    path = "/admin/audit",
    params(("limit" = Option<i64>, Query, description = "Maximum number of entries")),
    responses(
        (status = 200, description = "Audit entries", body = [AuditLogResponse]),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin role required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_audit_handler(
    Extension(audit_service): Extension<Arc<AuditService>>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditLogResponse>>, ApiError> {
    let entries = audit_service.list_recent(query.limit).await?;
    Ok(Json(
        entries.into_iter().map(AuditLogResponse::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    // Handler tests require integration test setup
}
