//! `OpenAPI` documentation for the grantflow API.
//!
//! The generated document is served as JSON at
//! `/api-docs/openapi.json`.

use axum::{routing::get, Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Security scheme modifier for Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// `OpenAPI` documentation for the grantflow API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "grantflow API",
        version = "0.1.0",
        description = "Grant management backend: accounts, grants, applications, billing and AI drafting"
    ),
    modifiers(&SecurityAddon),
    paths(
        crate::health::health_handler,
        grantflow_api::handlers::users::register_handler,
        grantflow_api::handlers::users::verify_handler,
        grantflow_api::handlers::users::login_handler,
        grantflow_api::handlers::users::request_password_reset_handler,
        grantflow_api::handlers::users::reset_password_handler,
        grantflow_api::handlers::users::me_handler,
        grantflow_api::handlers::users::update_me_handler,
        grantflow_api::handlers::grants::list_grants_handler,
        grantflow_api::handlers::grants::get_grant_handler,
        grantflow_api::handlers::grants::create_grant_handler,
        grantflow_api::handlers::applications::create_application_handler,
        grantflow_api::handlers::applications::list_applications_handler,
        grantflow_api::handlers::applications::update_application_handler,
        grantflow_api::handlers::applications::delete_application_handler,
        grantflow_api::handlers::audit::list_audit_handler,
        grantflow_api::handlers::billing::create_checkout_handler,
        grantflow_api::handlers::billing::webhook_handler,
        grantflow_api::handlers::draft::generate_draft_handler,
    ),
    components(schemas(
        grantflow_api::models::requests::RegisterRequest,
        grantflow_api::models::requests::VerifyRequest,
        grantflow_api::models::requests::LoginRequest,
        grantflow_api::models::requests::RequestPasswordResetRequest,
        grantflow_api::models::requests::ResetPasswordRequest,
        grantflow_api::models::requests::UpdateProfileRequest,
        grantflow_api::models::requests::CreateGrantRequest,
        grantflow_api::models::requests::CreateApplicationRequest,
        grantflow_api::models::requests::UpdateApplicationRequest,
        grantflow_api::models::requests::GenerateDraftRequest,
        grantflow_api::models::responses::UserResponse,
        grantflow_api::models::responses::RegisterResponse,
        grantflow_api::models::responses::TokenResponse,
        grantflow_api::models::responses::ResetRequestedResponse,
        grantflow_api::models::responses::GrantResponse,
        grantflow_api::models::responses::GrantSummary,
        grantflow_api::models::responses::ApplicationResponse,
        grantflow_api::models::responses::AuditLogResponse,
        grantflow_api::models::responses::CheckoutResponse,
        grantflow_api::models::responses::DraftResponse,
        grantflow_api::error::ProblemDetails,
    )),
    tags(
        (name = "Health", description = "Service health and status"),
        (name = "Users", description = "Registration, verification, login and profile"),
        (name = "Grants", description = "Grant listings"),
        (name = "Applications", description = "Grant applications"),
        (name = "Admin", description = "Administrative operations"),
        (name = "Billing", description = "Subscription checkout and webhook"),
        (name = "AI", description = "Application draft generation"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document as JSON.
pub fn openapi_routes() -> Router {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_all_operations() {
        let doc = ApiDoc::openapi();

        for path in [
            "/health",
            "/users/register",
            "/users/verify",
            "/users/login",
            "/users/request-password-reset",
            "/users/reset-password",
            "/users/me",
            "/grants",
            "/grants/{id}",
            "/admin/grants",
            "/applications",
            "/applications/{id}",
            "/admin/audit",
            "/billing/create-checkout-session",
            "/billing/webhook",
            "/ai/generate-application",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path {path} in OpenAPI document"
            );
        }
    }

    #[test]
    fn document_serializes_to_json() {
        let json = ApiDoc::openapi().to_json().unwrap();
        assert!(json.contains("grantflow API"));
        assert!(json.contains("bearer_auth"));
    }
}
