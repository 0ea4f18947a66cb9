//! Billing endpoints: hosted checkout and the provider webhook.

use std::sync::Arc;

use axum::{body::Bytes, http::HeaderMap, Extension, Json};
use serde_json::{json, Value};

use grantflow_core::UserId;

use crate::error::ApiError;
use crate::models::CheckoutResponse;
use crate::services::webhook_signature::SIGNATURE_HEADER;
use crate::services::{AuthService, BillingService};

/// Create a hosted checkout session for the current user.
#[utoipa::path(
    post,
    path = "/billing/create-checkout-session",
    responses(
        (status = 200, description = "Checkout session created", body = CheckoutResponse),
        (status = 401, description = "Authentication required"),
        (status = 503, description = "Billing not configured or provider unavailable"),
    ),
    security(("bearer_auth" = [])),
    tag = "Billing"
)]
pub async fn create_checkout_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Extension(billing_service): Extension<Arc<BillingService>>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let user = auth_service.get_user(*user_id.as_uuid()).await?;

    let checkout_url = billing_service
        .create_checkout_session(user.id, &user.email)
        .await?;

    Ok(Json(CheckoutResponse { checkout_url }))
}

/// Receive a webhook delivery from the billing provider.
///
/// Authenticated by the `Billing-Signature` HMAC header, not a bearer
/// token. Any signature failure rejects the whole delivery.
#[utoipa::path(
    post,
    path = "/billing/webhook",
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Event processed or acknowledged"),
        (status = 400, description = "Missing or invalid signature"),
    ),
    tag = "Billing"
)]
pub async fn webhook_handler(
    Extension(billing_service): Extension<Arc<BillingService>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let signature_header = headers
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok());

    billing_service
        .handle_webhook(signature_header, &body)
        .await?;

    Ok(Json(json!({ "received": true })))
}

#[cfg(test)]
mod tests {
    // Handler tests require integration test setup
}
