//! Business logic services.
//!
//! Each service is a `Clone` struct over the shared `PgPool`, wired
//! into handlers through request extensions.

pub mod application_service;
pub mod audit_service;
pub mod auth_service;
pub mod billing_service;
pub mod draft_service;
pub mod grant_service;
pub mod one_time_token;
pub mod webhook_signature;

pub use application_service::ApplicationService;
pub use audit_service::AuditService;
pub use auth_service::AuthService;
pub use billing_service::{BillingConfig, BillingService};
pub use draft_service::{DraftConfig, DraftService};
pub use grant_service::GrantService;
