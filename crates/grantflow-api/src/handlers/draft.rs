//! AI draft generation endpoint.

use std::sync::Arc;

use axum::{Extension, Json};

use crate::error::ApiError;
use crate::models::{DraftResponse, GenerateDraftRequest};
use crate::services::DraftService;

/// Generate a grant application draft.
#[utoipa::path(
    post,
    path = "/ai/generate-application",
    request_body = GenerateDraftRequest,
    responses(
        (status = 200, description = "Generated draft", body = DraftResponse),
        (status = 401, description = "Authentication required"),
        (status = 503, description = "Draft provider not configured or unavailable"),
    ),
    security(("bearer_auth" = [])),
    tag = "AI"
)]
pub async fn generate_draft_handler(
    Extension(draft_service): Extension<Arc<DraftService>>,
    Json(request): Json<GenerateDraftRequest>,
) -> Result<Json<DraftResponse>, ApiError> {
    let prompt = request.build_prompt();
    let draft = draft_service.generate(&prompt).await?;

    Ok(Json(DraftResponse { draft }))
}

#[cfg(test)]
mod tests {
    // Handler tests require integration test setup
}
