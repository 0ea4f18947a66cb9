//! Database entity models.

pub mod application;
pub mod audit_log;
pub mod grant;
pub mod user;

pub use application::{Application, ApplicationStatus, ApplicationWithGrant};
pub use audit_log::{AuditAction, AuditLog};
pub use grant::Grant;
pub use user::{Role, User};
