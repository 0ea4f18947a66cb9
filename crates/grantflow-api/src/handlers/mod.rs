//! HTTP request handlers.

pub mod applications;
pub mod audit;
pub mod billing;
pub mod draft;
pub mod grants;
pub mod users;

pub use applications::{
    create_application_handler, delete_application_handler, list_applications_handler,
    update_application_handler,
};
pub use audit::list_audit_handler;
pub use billing::{create_checkout_handler, webhook_handler};
pub use draft::generate_draft_handler;
pub use grants::{create_grant_handler, get_grant_handler, list_grants_handler};
pub use users::{
    login_handler, me_handler, register_handler, request_password_reset_handler,
    reset_password_handler, update_me_handler, verify_handler,
};
