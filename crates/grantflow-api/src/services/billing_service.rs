//! Billing provider integration: hosted checkout sessions and the
//! subscription webhook.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use grantflow_db::User;

use crate::error::ApiError;
use crate::services::webhook_signature::{parse_signature_header, verify_signature};

/// Request timeout for billing provider calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Webhook event type that carries subscription status changes.
const SUBSCRIPTION_UPDATED: &str = "customer.subscription.updated";

/// Billing provider settings.
#[derive(Clone, Default)]
pub struct BillingConfig {
    /// Provider API base URL, e.g. `https://api.billing.example`.
    pub api_base: String,
    /// Provider API secret key. Checkout is unavailable without it.
    pub secret_key: Option<String>,
    /// Price identifier for the subscription product.
    pub price_id: Option<String>,
    /// Shared secret for webhook signature verification.
    pub webhook_secret: Option<String>,
    /// Where the provider redirects after successful checkout.
    pub success_url: String,
    /// Where the provider redirects after cancelled checkout.
    pub cancel_url: String,
}

impl std::fmt::Debug for BillingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BillingConfig")
            .field("api_base", &self.api_base)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "***"))
            .field("price_id", &self.price_id)
            .field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "***"))
            .field("success_url", &self.success_url)
            .field("cancel_url", &self.cancel_url)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct CheckoutSession {
    url: String,
    #[serde(default)]
    customer: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WebhookEvent {
    #[serde(rename = "type")]
    event_type: String,
    data: WebhookEventData,
}

#[derive(Debug, Deserialize)]
struct WebhookEventData {
    object: WebhookObject,
}

#[derive(Debug, Deserialize)]
struct WebhookObject {
    #[serde(default)]
    customer: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// Service for billing provider operations.
#[derive(Clone)]
pub struct BillingService {
    pool: PgPool,
    http: reqwest::Client,
    config: BillingConfig,
}

impl BillingService {
    /// Create a new billing service.
    #[must_use]
    pub fn new(pool: PgPool, config: BillingConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self { pool, http, config }
    }

    /// Create a hosted checkout session for a user.
    ///
    /// Returns the checkout URL. Fails with `ServiceUnavailable` when
    /// the provider secret or price is not configured.
    pub async fn create_checkout_session(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<String, ApiError> {
        let secret_key = self.config.secret_key.as_deref().ok_or_else(|| {
            ApiError::ServiceUnavailable("Billing is not configured".to_string())
        })?;
        let price_id = self.config.price_id.as_deref().ok_or_else(|| {
            ApiError::ServiceUnavailable("Billing is not configured".to_string())
        })?;

        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.config.api_base))
            .bearer_auth(secret_key)
            .json(&json!({
                "mode": "subscription",
                "customer_email": email,
                "line_items": [{ "price": price_id, "quantity": 1 }],
                "success_url": self.config.success_url,
                "cancel_url": self.config.cancel_url,
            }))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Checkout session request failed: {}", e);
                ApiError::ServiceUnavailable("Billing provider unreachable".to_string())
            })?;

        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "Checkout session rejected");
            return Err(ApiError::ServiceUnavailable(
                "Billing provider rejected the request".to_string(),
            ));
        }

        let session: CheckoutSession = response.json().await.map_err(|e| {
            tracing::error!("Malformed checkout session response: {}", e);
            ApiError::ServiceUnavailable("Billing provider returned bad data".to_string())
        })?;

        if let Some(customer) = &session.customer {
            User::set_billing_customer(&self.pool, user_id, customer).await?;
        }

        tracing::info!(user_id = %user_id, "Checkout session created");
        Ok(session.url)
    }

    /// Handle a webhook delivery from the billing provider.
    ///
    /// The whole request fails on a missing or invalid signature.
    /// Subscription updates change the user's `subscription_status`;
    /// other event types are acknowledged without action.
    pub async fn handle_webhook(
        &self,
        signature_header: Option<&str>,
        body: &[u8],
    ) -> Result<(), ApiError> {
        let webhook_secret = self.config.webhook_secret.as_deref().ok_or_else(|| {
            ApiError::ServiceUnavailable("Billing webhook is not configured".to_string())
        })?;

        let header = signature_header
            .ok_or_else(|| ApiError::BadRequest("Missing webhook signature".to_string()))?;
        let parsed = parse_signature_header(header)
            .ok_or_else(|| ApiError::BadRequest("Malformed webhook signature".to_string()))?;

        if !verify_signature(&parsed.signature, webhook_secret, &parsed.timestamp, body) {
            tracing::warn!("Webhook signature verification failed");
            return Err(ApiError::BadRequest(
                "Invalid webhook signature".to_string(),
            ));
        }

        let event: WebhookEvent = serde_json::from_slice(body)
            .map_err(|e| ApiError::BadRequest(format!("Malformed webhook payload: {e}")))?;

        if event.event_type != SUBSCRIPTION_UPDATED {
            tracing::debug!(event_type = %event.event_type, "Ignoring webhook event");
            return Ok(());
        }

        let (Some(customer), Some(status)) =
            (&event.data.object.customer, &event.data.object.status)
        else {
            return Err(ApiError::BadRequest(
                "Subscription event missing customer or status".to_string(),
            ));
        };

        let updated = User::update_subscription_status(&self.pool, customer, status).await?;
        if updated == 0 {
            tracing::warn!("Subscription update for unknown billing customer");
        } else {
            tracing::info!(status = %status, "Subscription status updated");
        }

        Ok(())
    }
}
